use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Metabolizer phenotype, serialized as its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Phenotype {
    PM,
    IM,
    NM,
    /// Reserved; the activity-score ladder never produces it.
    RM,
    URM,
}

impl Phenotype {
    pub fn code(&self) -> &'static str {
        match self {
            Phenotype::PM => "PM",
            Phenotype::IM => "IM",
            Phenotype::NM => "NM",
            Phenotype::RM => "RM",
            Phenotype::URM => "URM",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Phenotype::PM => "Poor Metabolizer",
            Phenotype::IM => "Intermediate Metabolizer",
            Phenotype::NM => "Normal Metabolizer",
            Phenotype::RM => "Rapid Metabolizer",
            Phenotype::URM => "Ultrarapid Metabolizer",
        }
    }
}

impl Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(Phenotype::PM, "Poor Metabolizer")]
    #[case(Phenotype::URM, "Ultrarapid Metabolizer")]
    fn test_description(#[case] phenotype: Phenotype, #[case] expected: &str) {
        assert_eq!(phenotype.description(), expected);
    }

    #[rstest]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Phenotype::URM).unwrap(), "\"URM\"");
        assert_eq!(Phenotype::URM.to_string(), "URM");
    }
}
