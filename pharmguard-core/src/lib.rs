//! # Core models and reference data for pharmguard
//!
//! This crate holds the pieces every other pharmguard crate shares:
//!
//! - the data model (variants, gene results, recommendations, phenotypes)
//! - the immutable reference tables (gene panel, allele scores, CPIC
//!   recommendations) together with their compiled-in GRCh38 defaults
//! - small IO helpers for reading plain or gzip'd input
//!
pub mod errors;
pub mod models;
pub mod reference;
pub mod utils;

// re-exports
pub use errors::ReferenceDataError;
pub use reference::{
    AlleleScoreTable, AlleleSite, GenePanel, GeneGuideline, PanelGene, PhenotypeGuidance,
    RecommendationTable, ReferenceData, DEFAULT_ALLELE_SCORE,
};
