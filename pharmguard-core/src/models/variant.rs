/// The genotype used when a sample carries no GT field.
pub const MISSING_GENOTYPE: &str = "./.";

///
/// Variant struct, one coordinate-matched VCF data line.
///
/// Built once by the extractor and never mutated afterwards.
///
#[derive(PartialEq, Debug, Clone)]
pub struct Variant {
    /// Lowercased identifiers from the ID column and INFO `RS=`, de-duplicated.
    pub ids: Vec<String>,
    pub chromosome: String,
    pub position: u64,
    /// Allele indices joined by `/`, phased input included.
    pub genotype: String,
    pub qual: f64,
    pub gq: Option<f64>,
    /// Panel gene whose region contains `position`.
    pub gene: String,
    pub ref_allele: String,
    pub alt: String,
}

impl Variant {
    ///
    /// Split the genotype into its allele-index tokens.
    ///
    pub fn genotype_tokens(&self) -> impl Iterator<Item = &str> {
        self.genotype.split(['/', '|'])
    }

    ///
    /// Does the genotype carry at least one non-reference, non-missing allele?
    ///
    pub fn carries_alt(&self) -> bool {
        self.genotype_tokens().any(is_alt_token)
    }

    ///
    /// Are the first two allele tokens both alternate? Haploid or
    /// partially missing calls are never homozygous.
    ///
    pub fn is_homozygous_alt(&self) -> bool {
        let mut tokens = self.genotype_tokens();
        matches!(
            (tokens.next(), tokens.next()),
            (Some(a), Some(b)) if is_alt_token(a) && is_alt_token(b)
        )
    }

    ///
    /// Locus string in the form `chrom:pos`.
    ///
    pub fn locus(&self) -> String {
        format!("{}:{}", self.chromosome, self.position)
    }

    ///
    /// The first identifier when present, otherwise the locus.
    ///
    pub fn id_or_locus(&self) -> String {
        self.ids.first().cloned().unwrap_or_else(|| self.locus())
    }
}

fn is_alt_token(token: &str) -> bool {
    token != "0" && token != "."
}
