//! Chromosome → region index over the gene panel.

use fxhash::FxHashMap as HashMap;

use pharmguard_core::models::{GeneRegion, normalize_chrom};
use pharmguard_core::GenePanel;

///
/// Lookup from a (chromosome, position) pair to the panel gene whose region
/// contains it.
///
/// Chromosomes are hashed; the regions of one chromosome are scanned
/// linearly, which is plenty for a panel of a handful of genes.
///
#[derive(Debug, Clone)]
pub struct RegionIndex {
    by_chrom: HashMap<String, Vec<GeneRegion>>,
}

impl RegionIndex {
    pub fn from_panel(panel: &GenePanel) -> Self {
        Self::from_regions(panel.genes().iter().map(|g| g.region.clone()))
    }

    pub fn from_regions<I>(regions: I) -> Self
    where
        I: IntoIterator<Item = GeneRegion>,
    {
        let mut by_chrom: HashMap<String, Vec<GeneRegion>> = HashMap::default();
        for region in regions {
            by_chrom
                .entry(normalize_chrom(&region.chr))
                .or_default()
                .push(region);
        }
        RegionIndex { by_chrom }
    }

    ///
    /// Find the region containing `pos` on `chrom`. The chromosome name is
    /// normalized first, so `chr10`, `CHR10` and `10` are equivalent.
    ///
    pub fn find(&self, chrom: &str, pos: u64) -> Option<&GeneRegion> {
        self.find_normalized(&normalize_chrom(chrom), pos)
    }

    ///
    /// Same as [`RegionIndex::find`] for a chromosome that is already
    /// normalized.
    ///
    pub fn find_normalized(&self, chrom: &str, pos: u64) -> Option<&GeneRegion> {
        self.by_chrom
            .get(chrom)?
            .iter()
            .find(|region| region.contains(pos))
    }
}
