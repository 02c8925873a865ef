//! Quality metrics reported alongside every analysis.

use indexmap::IndexMap;

use pharmguard_core::GenePanel;
use pharmguard_core::models::Variant;

///
/// Mean QUAL over variants with a positive QUAL, scaled to `[0, 1]` by
/// dividing by 100 and rounded to three decimals. Zero when no variant
/// carries a usable QUAL.
///
pub fn confidence_score(variants: &[Variant]) -> f64 {
    let quals: Vec<f64> = variants
        .iter()
        .map(|v| v.qual)
        .filter(|q| *q > 0.0)
        .collect();

    if quals.is_empty() {
        return 0.0;
    }

    let mean = quals.iter().sum::<f64>() / quals.len() as f64;
    let rounded = ((mean / 100.0) * 1000.0).round() / 1000.0;
    rounded.min(1.0)
}

///
/// Panel gene → whether at least one extracted variant fell in its region,
/// in panel order.
///
pub fn gene_coverage(panel: &GenePanel, variants: &[Variant]) -> IndexMap<String, bool> {
    panel
        .gene_names()
        .map(|gene| {
            let covered = variants.iter().any(|v| v.gene == gene);
            (gene.to_string(), covered)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use pharmguard_core::ReferenceData;

    fn variant(gene: &str, qual: f64) -> Variant {
        Variant {
            ids: vec![],
            chromosome: "chr10".to_string(),
            position: 94981296,
            genotype: "0/1".to_string(),
            qual,
            gq: None,
            gene: gene.to_string(),
            ref_allele: "A".to_string(),
            alt: "C".to_string(),
        }
    }

    #[rstest]
    #[case(vec![], 0.0)]
    #[case(vec![0.0, 0.0], 0.0)]
    #[case(vec![60.0, 99.0, 50.0, 80.0, 70.0, 90.0], 0.748)]
    #[case(vec![60.0, 0.0], 0.6)]
    #[case(vec![250.0, 300.0], 1.0)]
    #[case(vec![33.3333], 0.333)]
    fn test_confidence_score(#[case] quals: Vec<f64>, #[case] expected: f64) {
        let variants: Vec<Variant> = quals.into_iter().map(|q| variant("CYP2C9", q)).collect();
        assert_eq!(confidence_score(&variants), expected);
    }

    #[rstest]
    fn test_gene_coverage_in_panel_order() {
        let reference = ReferenceData::builtin().unwrap();
        let variants = vec![variant("DPYD", 10.0), variant("CYP2C9", 10.0)];

        let coverage = gene_coverage(&reference.panel, &variants);
        let entries: Vec<(&str, bool)> = coverage.iter().map(|(g, c)| (g.as_str(), *c)).collect();
        assert_eq!(
            entries,
            vec![
                ("CYP2D6", false),
                ("CYP2C19", false),
                ("CYP2C9", true),
                ("SLCO1B1", false),
                ("TPMT", false),
                ("DPYD", true),
            ]
        );
    }
}
