//! Binding a variant to a known star-allele site.

use pharmguard_core::models::Variant;
use pharmguard_core::AlleleSite;

///
/// How (or whether) a variant was bound to a site of its gene.
///
/// Identifier matches always win over position matches; the position path
/// exists for files whose ID column is empty or uses another naming.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteMatch<'a> {
    MatchedById(&'a AlleleSite),
    MatchedByPosition(&'a AlleleSite),
    Unmatched,
}

impl<'a> SiteMatch<'a> {
    pub fn site(&self) -> Option<&'a AlleleSite> {
        match *self {
            SiteMatch::MatchedById(site) | SiteMatch::MatchedByPosition(site) => Some(site),
            SiteMatch::Unmatched => None,
        }
    }

    pub fn allele(&self) -> Option<&'a str> {
        self.site().map(|s| s.allele.as_str())
    }
}

///
/// Match a variant against the sites of one gene: first by identifier
/// (case-insensitive), then by exact position.
///
pub fn match_variant<'a>(variant: &Variant, sites: &'a [AlleleSite]) -> SiteMatch<'a> {
    let by_id = sites.iter().find(|site| {
        variant
            .ids
            .iter()
            .any(|id| id.eq_ignore_ascii_case(&site.rsid))
    });
    if let Some(site) = by_id {
        return SiteMatch::MatchedById(site);
    }

    match sites.iter().find(|site| site.pos == variant.position) {
        Some(site) => SiteMatch::MatchedByPosition(site),
        None => SiteMatch::Unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn sites() -> Vec<AlleleSite> {
        vec![
            AlleleSite {
                rsid: "rs1799853".to_string(),
                allele: "*2".to_string(),
                pos: 94942290,
            },
            AlleleSite {
                rsid: "rs1057910".to_string(),
                allele: "*3".to_string(),
                pos: 94981296,
            },
        ]
    }

    fn variant(ids: &[&str], position: u64) -> Variant {
        Variant {
            ids: ids.iter().map(|s| s.to_string()).collect(),
            chromosome: "10".to_string(),
            position,
            genotype: "0/1".to_string(),
            qual: 50.0,
            gq: None,
            gene: "CYP2C9".to_string(),
            ref_allele: "A".to_string(),
            alt: "C".to_string(),
        }
    }

    #[rstest]
    fn test_match_by_id(sites: Vec<AlleleSite>) {
        let m = match_variant(&variant(&["rs1057910"], 1), &sites);
        assert_eq!(m, SiteMatch::MatchedById(&sites[1]));
        assert_eq!(m.allele(), Some("*3"));
    }

    #[rstest]
    fn test_match_by_id_is_case_insensitive(sites: Vec<AlleleSite>) {
        let m = match_variant(&variant(&["RS1057910"], 1), &sites);
        assert_eq!(m.allele(), Some("*3"));
    }

    #[rstest]
    fn test_match_by_position_fallback(sites: Vec<AlleleSite>) {
        let m = match_variant(&variant(&[], 94942290), &sites);
        assert_eq!(m, SiteMatch::MatchedByPosition(&sites[0]));
    }

    #[rstest]
    fn test_id_match_takes_precedence_over_position(sites: Vec<AlleleSite>) {
        // positioned on the *2 site but carrying the *3 identifier
        let m = match_variant(&variant(&["rs1057910"], 94942290), &sites);
        assert_eq!(m, SiteMatch::MatchedById(&sites[1]));
    }

    #[rstest]
    fn test_unknown_id_falls_back_to_position(sites: Vec<AlleleSite>) {
        let m = match_variant(&variant(&["rs999"], 94981296), &sites);
        assert_eq!(m, SiteMatch::MatchedByPosition(&sites[1]));
    }

    #[rstest]
    fn test_unmatched(sites: Vec<AlleleSite>) {
        let m = match_variant(&variant(&["rs999"], 94950000), &sites);
        assert_eq!(m, SiteMatch::Unmatched);
        assert_eq!(m.allele(), None);
    }
}
