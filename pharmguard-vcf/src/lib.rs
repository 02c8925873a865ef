//! # Panel-restricted VCF reading
//!
//! This crate turns a raw single-sample VCF buffer into the variants that
//! fall inside the pharmguard gene panel. It provides:
//!
//! - a chromosome → region index built from the gene panel
//! - a line reader that pre-filters on CHROM/POS before paying for a full parse
//! - a variant extractor that normalizes genotypes and identifiers

pub mod error;
pub mod extract;
pub mod index;
pub mod reader;

pub use error::{ExtractError, VcfError};
pub use extract::extract_variant;
pub use index::RegionIndex;
pub use reader::{LineOutcome, ParsedVcf, parse_vcf, prefilter_line};
