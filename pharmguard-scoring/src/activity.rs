//! Activity scores and the phenotype threshold ladder.

use pharmguard_core::models::{Diplotype, Phenotype};
use pharmguard_core::AlleleScoreTable;

/// Upper bound (inclusive) of the poor metabolizer band.
pub const PM_MAX: f64 = 0.5;
/// Lower bound (inclusive) of the normal metabolizer band.
pub const NM_MIN: f64 = 1.25;
/// Upper bound (inclusive) of the normal metabolizer band.
pub const NM_MAX: f64 = 2.25;

///
/// Activity score of a diplotype: the sum of its two allele scores.
///
pub fn activity_score(scores: &AlleleScoreTable, gene: &str, diplotype: &Diplotype) -> f64 {
    scores.score(gene, &diplotype.allele1) + scores.score(gene, &diplotype.allele2)
}

///
/// Map an activity score to a phenotype.
///
/// | score               | phenotype |
/// |---------------------|-----------|
/// | `≤ 0.5`             | PM        |
/// | `0.5 < s < 1.25`    | IM        |
/// | `1.25 ≤ s ≤ 2.25`   | NM        |
/// | `> 2.25`            | URM       |
///
/// RM is never produced.
pub fn classify_phenotype(score: f64) -> Phenotype {
    if score <= PM_MAX {
        Phenotype::PM
    } else if score < NM_MIN {
        Phenotype::IM
    } else if score <= NM_MAX {
        Phenotype::NM
    } else {
        Phenotype::URM
    }
}

///
/// Score and classify a diplotype in one step.
///
pub fn score_diplotype(
    scores: &AlleleScoreTable,
    gene: &str,
    diplotype: &Diplotype,
) -> (f64, Phenotype) {
    let score = activity_score(scores, gene, diplotype);
    (score, classify_phenotype(score))
}
