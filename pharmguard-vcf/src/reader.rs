//! Streaming VCF line reader with a cheap coordinate pre-filter.
//!
//! Only lines falling inside a panel region are handed to the extractor;
//! everything else costs two `find('\t')` calls and an integer parse.

use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};

use pharmguard_core::models::{GeneRegion, Variant};

use crate::error::{Result, VcfError};
use crate::extract::extract_variant;
use crate::index::RegionIndex;

/// Column of the first sample name in the `#CHROM` header line.
const SAMPLE_COLUMN: usize = 9;

/// Classification of one data line by the pre-filter.
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome<'a> {
    /// Inside a panel region; worth a full parse.
    Target(&'a GeneRegion),
    /// Well formed, but outside every panel region.
    OffTarget,
    /// Missing the CHROM/POS tab boundaries, or POS is not numeric.
    Malformed,
}

///
/// Everything the reader learned from one buffer.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedVcf {
    pub sample_id: String,
    /// Coordinate-matched variants in file order.
    pub variants: Vec<Variant>,
    /// Every non-empty data line, on target or not.
    pub total_lines_scanned: usize,
    pub malformed_lines: usize,
    pub unparsable_lines: usize,
}

///
/// Classify a data line using only its first two tab boundaries.
///
pub fn prefilter_line<'a>(line: &str, index: &'a RegionIndex) -> LineOutcome<'a> {
    let Some(first_tab) = line.find('\t') else {
        return LineOutcome::Malformed;
    };
    let rest = &line[first_tab + 1..];
    let Some(second_tab) = rest.find('\t') else {
        return LineOutcome::Malformed;
    };

    let chrom = &line[..first_tab];
    let Ok(pos) = rest[..second_tab].trim().parse::<u64>() else {
        return LineOutcome::Malformed;
    };

    match index.find(chrom, pos) {
        Some(region) => LineOutcome::Target(region),
        None => LineOutcome::OffTarget,
    }
}

///
/// Parse a whole VCF buffer against the panel index.
///
/// # Arguments
/// - buffer: raw file bytes (decoded as lossy UTF-8)
/// - index: the chromosome → region index of the panel
///
/// # Errors
/// - [`VcfError::NoHeader`] when the buffer has no `#` header lines
/// - [`VcfError::NoDataLines`] when it has no non-empty data lines
pub fn parse_vcf(buffer: &[u8], index: &RegionIndex) -> Result<ParsedVcf> {
    let text = String::from_utf8_lossy(buffer);
    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).peekable();

    let mut last_header: Option<&str> = None;
    while let Some(line) = lines.next_if(|l| l.starts_with('#')) {
        last_header = Some(line);
    }
    let Some(last_header) = last_header else {
        return Err(VcfError::NoHeader);
    };

    let mut parsed = ParsedVcf {
        sample_id: sample_id_from_header(last_header),
        variants: Vec::new(),
        total_lines_scanned: 0,
        malformed_lines: 0,
        unparsable_lines: 0,
    };

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        parsed.total_lines_scanned += 1;

        let region = match prefilter_line(line, index) {
            LineOutcome::Target(region) => region,
            LineOutcome::OffTarget => continue,
            LineOutcome::Malformed => {
                parsed.malformed_lines += 1;
                continue;
            }
        };

        match extract_variant(line, &region.gene) {
            Ok(variant) => parsed.variants.push(variant),
            Err(e) if e.is_malformed() => parsed.malformed_lines += 1,
            Err(e) => {
                warn!(
                    "Skipping unparsable {} line at {}: {}",
                    region.gene,
                    line.split('\t').nth(1).unwrap_or("?"),
                    e
                );
                parsed.unparsable_lines += 1;
            }
        }
    }

    if parsed.total_lines_scanned == 0 {
        return Err(VcfError::NoDataLines);
    }

    debug!(
        "Scanned {} data lines for {}: {} target variants, {} malformed, {} unparsable",
        parsed.total_lines_scanned,
        parsed.sample_id,
        parsed.variants.len(),
        parsed.malformed_lines,
        parsed.unparsable_lines
    );

    Ok(parsed)
}

///
/// The sample name from the `#CHROM` column header, or a synthetic
/// `SAMPLE_<unix millis>` identifier when the file names no sample.
///
fn sample_id_from_header(header: &str) -> String {
    match header.split('\t').nth(SAMPLE_COLUMN).map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default();
            format!("SAMPLE_{}", millis)
        }
    }
}
