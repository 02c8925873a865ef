///
/// Strip a leading "chr" (any case) and upper-case the remainder, so that
/// `chr10`, `CHR10` and `10` all name the same contig.
///
pub fn normalize_chrom(chrom: &str) -> String {
    let trimmed = chrom.trim();
    let stripped = match trimmed.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &trimmed[3..],
        _ => trimmed,
    };
    stripped.to_ascii_uppercase()
}

///
/// GeneRegion struct, the genomic span of one panel gene.
///
/// Coordinates are 1-based and inclusive on both ends, matching VCF POS.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct GeneRegion {
    pub gene: String,
    pub chr: String,
    pub start: u64,
    pub end: u64,
}

impl GeneRegion {
    pub fn new(gene: &str, chr: &str, start: u64, end: u64) -> Self {
        GeneRegion {
            gene: gene.to_string(),
            chr: normalize_chrom(chr),
            start,
            end,
        }
    }

    ///
    /// Does this region contain the given 1-based position?
    ///
    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos <= self.end
    }

    pub fn overlaps(&self, other: &GeneRegion) -> bool {
        self.chr == other.chr && self.start <= other.end && other.start <= self.end
    }
}
