//! The JSON report handed back to callers.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use pharmguard_core::models::{GeneResult, RecommendationEntry};

use crate::explain::explanation_for;
use crate::pipeline::{AnalysisResult, QualityMetrics};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRecommendation {
    #[serde(flatten)]
    pub entry: RecommendationEntry,
    pub llm_generated_explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportQualityMetrics {
    #[serde(flatten)]
    pub quality: QualityMetrics,
    pub processing_time_ms: u64,
}

///
/// A complete pharmacogenomic report: the deterministic result plus any
/// explanations that arrived, stamped with the time it was built.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub patient_id: String,
    pub timestamp: DateTime<Utc>,
    pub drug_filter: Option<String>,
    pub pharmacogenomic_profile: Vec<GeneResult>,
    pub recommendations: Vec<ReportRecommendation>,
    pub quality_metrics: ReportQualityMetrics,
}

impl Report {
    ///
    /// Assemble a report. Every recommendation gets its explanation, or the
    /// placeholder text when none is present in `explanations`.
    ///
    pub fn new(
        result: AnalysisResult,
        explanations: &HashMap<String, String>,
        processing_time: Duration,
    ) -> Self {
        let recommendations = result
            .recommendations
            .into_iter()
            .map(|entry| {
                let llm_generated_explanation = explanation_for(explanations, &entry.pair_key());
                ReportRecommendation {
                    entry,
                    llm_generated_explanation,
                }
            })
            .collect();

        Report {
            patient_id: result.patient_id,
            timestamp: Utc::now(),
            drug_filter: result.drug_filter,
            pharmacogenomic_profile: result.gene_results,
            recommendations,
            quality_metrics: ReportQualityMetrics {
                quality: result.quality,
                processing_time_ms: processing_time.as_millis() as u64,
            },
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

///
/// The body reported when the input could not be parsed at all.
///
pub fn failure_report(error: &str, details: &str) -> Value {
    json!({
        "error": error,
        "details": details,
        "quality_metrics": { "vcf_parsing_success": false },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use pharmguard_core::ReferenceData;

    use crate::explain::PLACEHOLDER_EXPLANATION;
    use crate::pipeline::{AnalysisOptions, Analyzer};

    const VCF: &str = "##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tPGX01
chr10\t94781859\trs4244285\tG\tA\t99\tPASS\t.\tGT:GQ\t1/1:99
";

    #[fixture]
    fn result() -> AnalysisResult {
        Analyzer::new(ReferenceData::builtin().unwrap())
            .analyze(VCF.as_bytes(), &AnalysisOptions::with_drug("clopidogrel"))
            .unwrap()
    }

    #[rstest]
    fn test_report_shape(result: AnalysisResult) {
        let report = Report::new(result, &HashMap::new(), Duration::from_millis(12));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["patient_id"], "PGX01");
        assert_eq!(value["drug_filter"], "clopidogrel");
        assert!(value["timestamp"].as_str().unwrap().contains('T'));

        let profile = value["pharmacogenomic_profile"].as_array().unwrap();
        assert_eq!(profile.len(), 6);
        assert_eq!(profile[1]["primary_gene"], "CYP2C19");
        assert_eq!(profile[1]["diplotype"], "*2/*2");
        assert_eq!(profile[1]["phenotype"], "PM");
        assert_eq!(profile[1]["activity_score"], 0.0);
        assert_eq!(profile[1]["detected_variants"][0]["id_or_locus"], "rs4244285");

        let recs = value["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["gene"], "CYP2C19");
        assert_eq!(recs[0]["drug"], "CLOPIDOGREL");
        assert_eq!(recs[0]["risk_label"], "Ineffective");
        assert_eq!(recs[0]["severity"], "high");
        assert_eq!(recs[0]["llm_generated_explanation"], PLACEHOLDER_EXPLANATION);

        let quality = &value["quality_metrics"];
        assert_eq!(quality["vcf_parsing_success"], true);
        assert_eq!(quality["total_variants_in_file"], 1);
        assert_eq!(quality["target_variants_found"], 1);
        assert_eq!(quality["confidence_score"], 0.99);
        assert_eq!(quality["processing_time_ms"], 12);
        assert_eq!(quality["gene_coverage"]["CYP2C19"], true);
    }

    #[rstest]
    fn test_explanations_are_attached_by_pair(result: AnalysisResult) {
        let mut explanations = HashMap::new();
        explanations.insert(
            "CYP2C19:CLOPIDOGREL".to_string(),
            "Clopidogrel needs CYP2C19 to become active.".to_string(),
        );
        let deterministic = result.clone();

        let report = Report::new(result, &explanations, Duration::ZERO);
        assert_eq!(
            report.recommendations[0].llm_generated_explanation,
            "Clopidogrel needs CYP2C19 to become active."
        );
        assert_eq!(report.recommendations[0].entry, deterministic.recommendations[0]);
        assert_eq!(report.pharmacogenomic_profile, deterministic.gene_results);
    }

    #[rstest]
    fn test_failure_report() {
        let value = failure_report("VCF parsing failed", "Invalid VCF: no header lines found");
        assert_eq!(value["quality_metrics"]["vcf_parsing_success"], false);
        assert_eq!(value["error"], "VCF parsing failed");
    }
}
