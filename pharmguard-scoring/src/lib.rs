//! Star-allele resolution and clinical mapping for the pharmguard gene panel.
//!
//! The stages run in order for every panel gene:
//!
//! 1. [`matching`]: bind each variant to a known site, by identifier first
//!    and by position second
//! 2. [`diplotype`]: collect carried star alleles and assemble a diplotype
//! 3. [`activity`]: sum allele scores and classify the phenotype
//! 4. [`recommend`]: look up CPIC guidance for the gene and phenotype
//!
//! [`profile`] drives the first three over a whole variant list.

pub mod activity;
pub mod diplotype;
pub mod matching;
pub mod profile;
pub mod recommend;

// re-exports
pub use activity::{activity_score, classify_phenotype, score_diplotype};
pub use diplotype::{DetectedAllele, detect_alleles, resolve_diplotype};
pub use matching::{SiteMatch, match_variant};
pub use profile::{analyze_variants, recommend_all};
pub use recommend::recommendations_for;
