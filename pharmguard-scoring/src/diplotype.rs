//! Star-allele detection and diplotype assembly for one gene.

use log::debug;

use pharmguard_core::models::{Diplotype, Variant};
use pharmguard_core::PanelGene;

use crate::matching::{SiteMatch, match_variant};

/// A star allele with evidence in the sample, and the variant that first
/// supplied that evidence.
#[derive(Debug, Clone, Copy)]
pub struct DetectedAllele<'a> {
    pub allele: &'a str,
    pub source: &'a Variant,
    pub matched: SiteMatch<'a>,
}

///
/// Star alleles carried by the sample for `gene`, de-duplicated in
/// first-seen order. A bound variant counts as evidence when its genotype
/// has any allele index other than `0` or `.`.
///
pub fn detect_alleles<'a, I>(gene: &'a PanelGene, variants: I) -> Vec<DetectedAllele<'a>>
where
    I: IntoIterator<Item = &'a Variant>,
{
    let mut detected: Vec<DetectedAllele<'a>> = Vec::new();

    for variant in variants {
        let matched = match_variant(variant, &gene.sites);
        let Some(allele) = matched.allele() else {
            continue;
        };
        if !variant.carries_alt() || detected.iter().any(|d| d.allele == allele) {
            continue;
        }
        detected.push(DetectedAllele {
            allele,
            source: variant,
            matched,
        });
    }

    detected
}

///
/// Assemble the diplotype for one gene.
///
/// - nothing detected: `*1/*1`
/// - one allele `X`: `X/X` when its source variant is homozygous alt,
///   `*1/X` otherwise
/// - two or more: the first two in first-seen order
///
pub fn resolve_diplotype<'a, I>(gene: &'a PanelGene, variants: I) -> Diplotype
where
    I: IntoIterator<Item = &'a Variant>,
{
    let detected = detect_alleles(gene, variants);

    match detected.as_slice() {
        [] => Diplotype::reference(),
        [only] if only.source.is_homozygous_alt() => Diplotype::homozygous(only.allele),
        [only] => Diplotype::heterozygous(only.allele),
        [first, second, rest @ ..] => {
            // TODO: decide how to call three or more detected alleles (phasing
            // or function-based ranking); until then only the first two are kept.
            if !rest.is_empty() {
                debug!(
                    "{}: dropping {} additional detected allele(s): {:?}",
                    gene.name(),
                    rest.len(),
                    rest.iter().map(|d| d.allele).collect::<Vec<_>>()
                );
            }
            Diplotype::new(first.allele, second.allele)
        }
    }
}
