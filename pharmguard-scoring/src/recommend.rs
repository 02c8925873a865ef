//! CPIC-style recommendation lookup.

use log::warn;

use pharmguard_core::models::{RecommendationEntry, Severity, UNKNOWN_RISK_LABEL};
use pharmguard_core::RecommendationTable;

///
/// One recommendation per drug associated with `gene`, in the table's
/// drug order.
///
/// - a gene missing from the table yields no entries
/// - a phenotype code missing from the gene's table yields an `Unknown`
///   entry with severity `none` for every drug
///
pub fn recommendations_for(
    table: &RecommendationTable,
    gene: &str,
    phenotype: &str,
) -> Vec<RecommendationEntry> {
    let Some(guideline) = table.guideline(gene) else {
        return Vec::new();
    };

    match guideline.phenotypes.get(phenotype) {
        Some(guidance) => guideline
            .drugs
            .iter()
            .map(|drug| RecommendationEntry {
                gene: gene.to_string(),
                drug: drug.clone(),
                risk_label: guidance.risk_label.clone(),
                severity: guidance.severity,
                recommendation: guidance.recommendation.clone(),
            })
            .collect(),
        None => {
            warn!(
                "No CPIC recommendation found for {} phenotype: {}",
                gene, phenotype
            );
            guideline
                .drugs
                .iter()
                .map(|drug| RecommendationEntry {
                    gene: gene.to_string(),
                    drug: drug.clone(),
                    risk_label: UNKNOWN_RISK_LABEL.to_string(),
                    severity: Severity::None,
                    recommendation: format!(
                        "Pharmacogenomic status {} for {} has no standard CPIC recommendation. \
                         Clinical judgment required.",
                        phenotype, gene
                    ),
                })
                .collect()
        }
    }
}
