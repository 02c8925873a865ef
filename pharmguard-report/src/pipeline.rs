//! One deterministic pass from a VCF buffer to a clinical result.

use std::sync::Arc;

use indexmap::IndexMap;
use log::info;
use serde::Serialize;

use pharmguard_core::ReferenceData;
use pharmguard_core::models::{GeneResult, RecommendationEntry};
use pharmguard_scoring::{analyze_variants, recommend_all};
use pharmguard_vcf::{RegionIndex, parse_vcf};

use crate::error::AnalysisError;
use crate::explain::ExplainRequest;
use crate::quality::{confidence_score, gene_coverage};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOptions {
    /// Keep only recommendations for this drug, matched case-insensitively.
    pub drug_filter: Option<String>,
}

impl AnalysisOptions {
    pub fn with_drug(drug: &str) -> Self {
        AnalysisOptions {
            drug_filter: Some(drug.to_string()),
        }
    }

    /// The drug filter, trimmed. A blank filter is no filter.
    pub fn drug(&self) -> Option<&str> {
        self.drug_filter
            .as_deref()
            .map(str::trim)
            .filter(|drug| !drug.is_empty())
    }
}

/// Counters describing what the reader saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineMetadata {
    pub total_lines_scanned: usize,
    pub target_variants_found: usize,
    pub malformed_lines: usize,
    pub unparsable_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    pub total_variants_in_file: usize,
    pub target_variants_found: usize,
    pub gene_coverage: IndexMap<String, bool>,
    pub confidence_score: f64,
}

///
/// The complete deterministic outcome of one analysis.
///
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub patient_id: String,
    pub drug_filter: Option<String>,
    /// One entry per panel gene, in panel order.
    pub gene_results: Vec<GeneResult>,
    /// Gene order, then drug declaration order, after the drug filter.
    pub recommendations: Vec<RecommendationEntry>,
    pub quality: QualityMetrics,
    pub metadata: PipelineMetadata,
}

impl AnalysisResult {
    pub fn gene_result(&self, gene: &str) -> Option<&GeneResult> {
        self.gene_results.iter().find(|r| r.primary_gene == gene)
    }

    ///
    /// One explanation request per surviving recommendation.
    ///
    pub fn explain_requests(&self) -> Vec<ExplainRequest> {
        self.recommendations
            .iter()
            .filter_map(|rec| {
                self.gene_result(&rec.gene)
                    .map(|gene_result| ExplainRequest::new(gene_result, rec))
            })
            .collect()
    }
}

///
/// Run the whole deterministic pipeline over one buffer.
///
/// # Arguments
/// - reference: the reference tables
/// - index: a region index built from `reference.panel`
/// - buffer: raw VCF bytes
/// - options: per-request options
pub fn analyze(
    reference: &ReferenceData,
    index: &RegionIndex,
    buffer: &[u8],
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError> {
    let parsed = parse_vcf(buffer, index)?;

    let gene_results = analyze_variants(reference, &parsed.variants);
    let mut recommendations = recommend_all(reference, &gene_results);
    let drug_filter = options.drug();
    if let Some(drug) = drug_filter {
        recommendations.retain(|rec| rec.matches_drug(drug));
    }

    let metadata = PipelineMetadata {
        total_lines_scanned: parsed.total_lines_scanned,
        target_variants_found: parsed.variants.len(),
        malformed_lines: parsed.malformed_lines,
        unparsable_lines: parsed.unparsable_lines,
    };

    let quality = QualityMetrics {
        vcf_parsing_success: true,
        total_variants_in_file: parsed.total_lines_scanned,
        target_variants_found: parsed.variants.len(),
        gene_coverage: gene_coverage(&reference.panel, &parsed.variants),
        confidence_score: confidence_score(&parsed.variants),
    };

    info!(
        "Analyzed sample {}: {} of {} line(s) on target, {} recommendation(s)",
        parsed.sample_id,
        metadata.target_variants_found,
        metadata.total_lines_scanned,
        recommendations.len()
    );

    Ok(AnalysisResult {
        patient_id: parsed.sample_id,
        drug_filter: drug_filter.map(str::to_string),
        gene_results,
        recommendations,
        quality,
        metadata,
    })
}

///
/// Reference tables plus the region index derived from them, built once
/// and shared across requests.
///
#[derive(Debug, Clone)]
pub struct Analyzer {
    reference: Arc<ReferenceData>,
    index: Arc<RegionIndex>,
}

impl Analyzer {
    pub fn new(reference: ReferenceData) -> Self {
        let index = RegionIndex::from_panel(&reference.panel);
        Analyzer {
            reference: Arc::new(reference),
            index: Arc::new(index),
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn index(&self) -> &RegionIndex {
        &self.index
    }

    pub fn analyze(
        &self,
        buffer: &[u8],
        options: &AnalysisOptions,
    ) -> Result<AnalysisResult, AnalysisError> {
        analyze(&self.reference, &self.index, buffer, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use pharmguard_vcf::VcfError;

    const VCF: &str = "##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNA12878
chr22\t42128945\trs3892097\tC\tT\t60\tPASS\t.\tGT\t1/1
chr1\t97450058\trs3918290\tC\tT\t40\tPASS\t.\tGT\t0/1
chr2\t500\t.\tA\tG\t10\tPASS\t.\tGT\t0/1
";

    #[fixture]
    fn analyzer() -> Analyzer {
        Analyzer::new(ReferenceData::builtin().unwrap())
    }

    #[rstest]
    fn test_analyze_full_panel(analyzer: Analyzer) {
        let result = analyzer
            .analyze(VCF.as_bytes(), &AnalysisOptions::default())
            .unwrap();

        assert_eq!(result.patient_id, "NA12878");
        assert_eq!(result.gene_results.len(), 6);
        assert_eq!(result.recommendations.len(), 7);
        assert_eq!(
            result.metadata,
            PipelineMetadata {
                total_lines_scanned: 3,
                target_variants_found: 2,
                malformed_lines: 0,
                unparsable_lines: 0,
            }
        );
        assert_eq!(result.quality.confidence_score, 0.5);
        assert_eq!(result.quality.gene_coverage["CYP2D6"], true);
        assert_eq!(result.quality.gene_coverage["CYP2C9"], false);

        let cyp2d6 = result.gene_result("CYP2D6").unwrap();
        assert_eq!(cyp2d6.diplotype.to_string(), "*4/*4");
    }

    #[rstest]
    #[case("codeine", vec!["CYP2D6:CODEINE"])]
    #[case("Capecitabine", vec!["DPYD:CAPECITABINE"])]
    #[case("ibuprofen", vec![])]
    fn test_drug_filter_is_case_insensitive(
        analyzer: Analyzer,
        #[case] drug: &str,
        #[case] expected: Vec<&str>,
    ) {
        let result = analyzer
            .analyze(VCF.as_bytes(), &AnalysisOptions::with_drug(drug))
            .unwrap();

        let pairs: Vec<String> = result.recommendations.iter().map(|r| r.pair_key()).collect();
        assert_eq!(pairs, expected);
        // the profile is never filtered
        assert_eq!(result.gene_results.len(), 6);
        assert_eq!(result.drug_filter.as_deref(), Some(drug));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_blank_drug_filter_keeps_everything(analyzer: Analyzer, #[case] drug: &str) {
        let result = analyzer
            .analyze(VCF.as_bytes(), &AnalysisOptions::with_drug(drug))
            .unwrap();

        assert_eq!(result.recommendations.len(), 7);
        assert_eq!(result.drug_filter, None);
    }

    #[rstest]
    fn test_drug_filter_is_trimmed(analyzer: Analyzer) {
        let result = analyzer
            .analyze(VCF.as_bytes(), &AnalysisOptions::with_drug(" codeine "))
            .unwrap();

        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.drug_filter.as_deref(), Some("codeine"));
    }

    #[rstest]
    fn test_explain_requests_follow_recommendations(analyzer: Analyzer) {
        let result = analyzer
            .analyze(VCF.as_bytes(), &AnalysisOptions::with_drug("FLUOROURACIL"))
            .unwrap();

        let requests = result.explain_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].gene, "DPYD");
        assert_eq!(requests[0].diplotype, "*1/*2A");
        assert_eq!(requests[0].risk_label, "Adjust Dosage");
    }

    #[rstest]
    #[case("", VcfError::NoHeader)]
    #[case("chr1\t100\t.\tA\tG\t30\tPASS\t.\n", VcfError::NoHeader)]
    #[case("##fileformat=VCFv4.2\n#CHROM\tPOS\n\n", VcfError::NoDataLines)]
    fn test_invalid_input(analyzer: Analyzer, #[case] vcf: &str, #[case] expected: VcfError) {
        let err = analyzer
            .analyze(vcf.as_bytes(), &AnalysisOptions::default())
            .unwrap_err();
        let AnalysisError::InvalidInput(inner) = err;
        assert_eq!(inner, expected);
    }

    #[rstest]
    fn test_repeated_analysis_is_identical(analyzer: Analyzer) {
        let options = AnalysisOptions::default();
        let first = analyzer.analyze(VCF.as_bytes(), &options).unwrap();
        let second = analyzer.analyze(VCF.as_bytes(), &options).unwrap();
        assert_eq!(first, second);
    }
}
