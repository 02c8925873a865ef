//! Static reference tables: the gene panel, allele activity scores and the
//! CPIC recommendation table.
//!
//! The tables are built once (from the compiled-in GRCh38 copies or from
//! JSON files on disk), validated, and then only ever read. A
//! [`ReferenceData`] is `Send + Sync` and is meant to be shared by reference
//! across any number of concurrent analyses.

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::errors::ReferenceDataError;
use crate::models::{GeneRegion, Severity};

const BUILTIN_GENE_PANEL: &str = include_str!("../data/gene_panel.json");
const BUILTIN_ALLELE_SCORES: &str = include_str!("../data/allele_scores.json");
const BUILTIN_RECOMMENDATIONS: &str = include_str!("../data/cpic_recommendations.json");

/// Score assumed for any allele, or gene, missing from the score table.
pub const DEFAULT_ALLELE_SCORE: f64 = 1.0;

#[derive(Deserialize)]
struct RawSite {
    allele: String,
    pos: u64,
}

#[derive(Deserialize)]
struct RawPanelGene {
    chr: String,
    start: u64,
    end: u64,
    #[serde(default)]
    rsids: IndexMap<String, RawSite>,
}

/// A known variant site that defines a star allele.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AlleleSite {
    /// Always lowercase.
    pub rsid: String,
    pub allele: String,
    pub pos: u64,
}

/// One panel gene: its region and the sites that tag its star alleles.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PanelGene {
    pub region: GeneRegion,
    pub sites: Vec<AlleleSite>,
}

impl PanelGene {
    pub fn name(&self) -> &str {
        &self.region.gene
    }
}

///
/// The ordered gene panel. Order is the declaration order of the source
/// table and drives the order of every per-gene output.
///
#[derive(Debug, Clone)]
pub struct GenePanel {
    genes: Vec<PanelGene>,
}

impl GenePanel {
    ///
    /// Parse a panel from its JSON form:
    /// `{ gene: { chr, start, end, rsids: { rsid: { allele, pos } } } }`
    ///
    pub fn from_json(json: &str) -> Result<GenePanel, ReferenceDataError> {
        let raw: IndexMap<String, RawPanelGene> =
            serde_json::from_str(json).map_err(|source| ReferenceDataError::JsonError {
                table: "gene panel",
                source,
            })?;

        let genes = raw
            .into_iter()
            .map(|(gene, entry)| PanelGene {
                region: GeneRegion::new(&gene, &entry.chr, entry.start, entry.end),
                sites: entry
                    .rsids
                    .into_iter()
                    .map(|(rsid, site)| AlleleSite {
                        rsid: rsid.to_ascii_lowercase(),
                        allele: site.allele,
                        pos: site.pos,
                    })
                    .collect(),
            })
            .collect();

        GenePanel::new(genes)
    }

    ///
    /// Build a panel from already-constructed genes, validating that every
    /// region is well formed, that no two regions overlap and that every
    /// site lies inside its gene.
    ///
    pub fn new(genes: Vec<PanelGene>) -> Result<GenePanel, ReferenceDataError> {
        if genes.is_empty() {
            return Err(ReferenceDataError::EmptyPanel);
        }

        for (i, gene) in genes.iter().enumerate() {
            let region = &gene.region;
            if region.start > region.end {
                return Err(ReferenceDataError::InvalidRegion {
                    gene: region.gene.clone(),
                    start: region.start,
                    end: region.end,
                });
            }

            if let Some(site) = gene.sites.iter().find(|s| !region.contains(s.pos)) {
                return Err(ReferenceDataError::SiteOutsideRegion {
                    gene: region.gene.clone(),
                    rsid: site.rsid.clone(),
                    allele: site.allele.clone(),
                    pos: site.pos,
                });
            }

            if let Some(other) = genes[..i].iter().find(|g| g.region.overlaps(region)) {
                return Err(ReferenceDataError::OverlappingRegions {
                    first: other.region.gene.clone(),
                    second: region.gene.clone(),
                    chr: region.chr.clone(),
                });
            }
        }

        Ok(GenePanel { genes })
    }

    pub fn genes(&self) -> &[PanelGene] {
        &self.genes
    }

    pub fn gene(&self, name: &str) -> Option<&PanelGene> {
        self.genes.iter().find(|g| g.name() == name)
    }

    pub fn gene_names(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(|g| g.name())
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

///
/// Per-gene activity scores for star alleles.
///
#[derive(Debug, Clone, Default)]
pub struct AlleleScoreTable {
    scores: HashMap<String, HashMap<String, f64>>,
}

impl AlleleScoreTable {
    pub fn from_json(json: &str) -> Result<AlleleScoreTable, ReferenceDataError> {
        let scores = serde_json::from_str(json).map_err(|source| ReferenceDataError::JsonError {
            table: "allele scores",
            source,
        })?;
        Ok(AlleleScoreTable { scores })
    }

    ///
    /// Score for an allele of a gene. Unknown genes and unknown alleles
    /// (including an untabulated `*1`) score [`DEFAULT_ALLELE_SCORE`].
    ///
    pub fn score(&self, gene: &str, allele: &str) -> f64 {
        self.scores
            .get(gene)
            .and_then(|alleles| alleles.get(allele))
            .copied()
            .unwrap_or(DEFAULT_ALLELE_SCORE)
    }
}

/// Guideline text for one phenotype of a gene.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PhenotypeGuidance {
    pub risk_label: String,
    #[serde(default)]
    pub severity: Severity,
    pub recommendation: String,
}

/// Drugs associated with a gene and the guidance per phenotype code.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GeneGuideline {
    pub drugs: Vec<String>,
    #[serde(default)]
    pub phenotypes: HashMap<String, PhenotypeGuidance>,
}

///
/// CPIC-style recommendation table, keyed by gene symbol.
///
#[derive(Debug, Clone, Default)]
pub struct RecommendationTable {
    genes: HashMap<String, GeneGuideline>,
}

impl RecommendationTable {
    pub fn from_json(json: &str) -> Result<RecommendationTable, ReferenceDataError> {
        let genes = serde_json::from_str(json).map_err(|source| ReferenceDataError::JsonError {
            table: "recommendations",
            source,
        })?;
        Ok(RecommendationTable { genes })
    }

    pub fn guideline(&self, gene: &str) -> Option<&GeneGuideline> {
        self.genes.get(gene)
    }

    pub fn drugs(&self, gene: &str) -> &[String] {
        self.genes
            .get(gene)
            .map(|g| g.drugs.as_slice())
            .unwrap_or_default()
    }
}

///
/// All reference tables needed by one analysis.
///
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub panel: GenePanel,
    pub scores: AlleleScoreTable,
    pub recommendations: RecommendationTable,
}

impl ReferenceData {
    pub fn new(
        panel: GenePanel,
        scores: AlleleScoreTable,
        recommendations: RecommendationTable,
    ) -> Self {
        ReferenceData {
            panel,
            scores,
            recommendations,
        }
    }

    ///
    /// The compiled-in GRCh38 tables for the six-gene panel
    /// (CYP2D6, CYP2C19, CYP2C9, SLCO1B1, TPMT, DPYD).
    ///
    pub fn builtin() -> Result<ReferenceData, ReferenceDataError> {
        Ok(ReferenceData {
            panel: GenePanel::from_json(BUILTIN_GENE_PANEL)?,
            scores: AlleleScoreTable::from_json(BUILTIN_ALLELE_SCORES)?,
            recommendations: RecommendationTable::from_json(BUILTIN_RECOMMENDATIONS)?,
        })
    }

    ///
    /// Load tables from JSON files. Any path left as `None` uses the
    /// compiled-in table instead.
    ///
    /// # Arguments
    /// - panel: path to a gene panel table
    /// - scores: path to an allele score table
    /// - recommendations: path to a recommendation table
    pub fn from_paths(
        panel: Option<&Path>,
        scores: Option<&Path>,
        recommendations: Option<&Path>,
    ) -> Result<ReferenceData, ReferenceDataError> {
        let panel = match panel {
            Some(path) => GenePanel::from_json(&read_table(path)?)?,
            None => GenePanel::from_json(BUILTIN_GENE_PANEL)?,
        };
        let scores = match scores {
            Some(path) => AlleleScoreTable::from_json(&read_table(path)?)?,
            None => AlleleScoreTable::from_json(BUILTIN_ALLELE_SCORES)?,
        };
        let recommendations = match recommendations {
            Some(path) => RecommendationTable::from_json(&read_table(path)?)?,
            None => RecommendationTable::from_json(BUILTIN_RECOMMENDATIONS)?,
        };

        Ok(ReferenceData::new(panel, scores, recommendations))
    }
}

fn read_table(path: &Path) -> Result<String, ReferenceDataError> {
    read_to_string(path)
        .map_err(|e| ReferenceDataError::FileReadError(format!("{}: {}", path.display(), e)))
}
