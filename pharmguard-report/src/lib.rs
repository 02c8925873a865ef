//! # Analysis pipeline and reporting for pharmguard
//!
//! This crate ties the reader, the scorer and the recommendation mapper
//! together into a single call, and builds the report around the result:
//!
//! - [`pipeline`]: one deterministic pass over a VCF buffer, with an optional drug filter
//! - [`quality`]: confidence score and gene coverage
//! - [`explain`]: optional explanation enrichment under a wall-clock budget
//! - [`report`]: the serializable report
//! - [`config`]: the TOML configuration file
//!
pub mod config;
pub mod error;
pub mod explain;
pub mod pipeline;
pub mod quality;
pub mod report;

// re-expose the main entry points
pub use config::{ExplainConfig, PharmguardConfig, ReferenceConfig};
pub use error::{AnalysisError, ConfigError, ExplainError};
pub use explain::{
    ExplainRequest, Explainer, HttpExplainer, PLACEHOLDER_EXPLANATION, enrich, explanation_for,
};
pub use pipeline::{AnalysisOptions, AnalysisResult, Analyzer, PipelineMetadata, QualityMetrics, analyze};
pub use report::{Report, failure_report};
