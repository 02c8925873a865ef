use serde::Serialize;

use super::severity::Severity;

/// Risk label used when a phenotype has no guideline entry.
pub const UNKNOWN_RISK_LABEL: &str = "Unknown";

///
/// RecommendationEntry struct, the guidance for one (gene, drug) pair.
///
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct RecommendationEntry {
    pub gene: String,
    pub drug: String,
    pub risk_label: String,
    pub severity: Severity,
    pub recommendation: String,
}

impl RecommendationEntry {
    ///
    /// Key identifying the (gene, drug) pair, `GENE:DRUG`.
    ///
    pub fn pair_key(&self) -> String {
        format!("{}:{}", self.gene, self.drug)
    }

    pub fn matches_drug(&self, drug: &str) -> bool {
        self.drug.eq_ignore_ascii_case(drug.trim())
    }
}
