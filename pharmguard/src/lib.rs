//! # pharmguard
//!
//! Turns a single-sample VCF into star-allele diplotypes, activity scores,
//! metabolizer phenotypes and CPIC-style drug recommendations for a fixed
//! panel of pharmacogenes. Each stage lives in its own crate and is
//! re-exported here behind a feature of the same name.

#[cfg(feature = "core")]
#[doc(inline)]
pub use pharmguard_core as core;

#[cfg(feature = "vcf")]
#[doc(inline)]
pub use pharmguard_vcf as vcf;

#[cfg(feature = "scoring")]
#[doc(inline)]
pub use pharmguard_scoring as scoring;

#[cfg(feature = "report")]
#[doc(inline)]
pub use pharmguard_report as report;
