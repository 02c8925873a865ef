pub mod gene_result;
pub mod phenotype;
pub mod recommendation;
pub mod region;
pub mod severity;
pub mod variant;

// re-export for cleaner imports
pub use self::gene_result::{DetectedVariant, Diplotype, GeneResult, REFERENCE_ALLELE};
pub use self::phenotype::Phenotype;
pub use self::recommendation::{RecommendationEntry, UNKNOWN_RISK_LABEL};
pub use self::region::{GeneRegion, normalize_chrom};
pub use self::severity::Severity;
pub use self::variant::{MISSING_GENOTYPE, Variant};
