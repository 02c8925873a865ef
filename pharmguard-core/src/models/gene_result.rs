use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

use super::phenotype::Phenotype;

/// Label of the reference (wild-type) star allele.
pub const REFERENCE_ALLELE: &str = "*1";

///
/// A pair of star alleles. Displays and serializes as `allele1/allele2`.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Diplotype {
    pub allele1: String,
    pub allele2: String,
}

impl Diplotype {
    pub fn new(allele1: &str, allele2: &str) -> Self {
        Diplotype {
            allele1: allele1.to_string(),
            allele2: allele2.to_string(),
        }
    }

    /// `*1/*1`
    pub fn reference() -> Self {
        Diplotype::new(REFERENCE_ALLELE, REFERENCE_ALLELE)
    }

    /// `*1/allele`
    pub fn heterozygous(allele: &str) -> Self {
        Diplotype::new(REFERENCE_ALLELE, allele)
    }

    /// `allele/allele`
    pub fn homozygous(allele: &str) -> Self {
        Diplotype::new(allele, allele)
    }
}

impl Display for Diplotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.allele1, self.allele2)
    }
}

impl Serialize for Diplotype {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A variant reported against a gene, by identifier or locus.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct DetectedVariant {
    pub id_or_locus: String,
}

///
/// GeneResult struct, the profile of one panel gene.
///
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct GeneResult {
    pub primary_gene: String,
    pub diplotype: Diplotype,
    pub phenotype: Phenotype,
    pub activity_score: f64,
    pub detected_variants: Vec<DetectedVariant>,
}

impl GeneResult {
    pub fn allele1(&self) -> &str {
        &self.diplotype.allele1
    }

    pub fn allele2(&self) -> &str {
        &self.diplotype.allele2
    }
}
