//! Per-gene profiling: resolve, score and classify every panel gene.

use fxhash::FxHashMap as HashMap;
use log::debug;

use pharmguard_core::models::{DetectedVariant, GeneResult, RecommendationEntry, Variant};
use pharmguard_core::ReferenceData;

use crate::activity::score_diplotype;
use crate::diplotype::resolve_diplotype;
use crate::recommend::recommendations_for;

///
/// Build one [`GeneResult`] per panel gene, in panel order. Genes without a
/// single matching variant resolve to `*1/*1`.
///
pub fn analyze_variants(reference: &ReferenceData, variants: &[Variant]) -> Vec<GeneResult> {
    let mut by_gene: HashMap<&str, Vec<&Variant>> = HashMap::default();
    for variant in variants {
        by_gene.entry(variant.gene.as_str()).or_default().push(variant);
    }

    reference
        .panel
        .genes()
        .iter()
        .map(|gene| {
            let gene_variants = by_gene.get(gene.name()).map(Vec::as_slice).unwrap_or_default();

            let diplotype = resolve_diplotype(gene, gene_variants.iter().copied());
            let (activity_score, phenotype) =
                score_diplotype(&reference.scores, gene.name(), &diplotype);

            debug!(
                "{}: {} variant(s), diplotype {}, activity score {}, {}",
                gene.name(),
                gene_variants.len(),
                diplotype,
                activity_score,
                phenotype
            );

            GeneResult {
                primary_gene: gene.name().to_string(),
                diplotype,
                phenotype,
                activity_score,
                detected_variants: gene_variants
                    .iter()
                    .map(|v| DetectedVariant {
                        id_or_locus: v.id_or_locus(),
                    })
                    .collect(),
            }
        })
        .collect()
}

///
/// Recommendations for every gene result, flattened in gene order and then
/// drug order.
///
pub fn recommend_all(
    reference: &ReferenceData,
    gene_results: &[GeneResult],
) -> Vec<RecommendationEntry> {
    gene_results
        .iter()
        .flat_map(|result| {
            recommendations_for(
                &reference.recommendations,
                &result.primary_gene,
                result.phenotype.code(),
            )
        })
        .collect()
}
