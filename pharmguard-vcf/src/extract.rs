//! Full parsing of a coordinate-matched VCF data line into a [`Variant`].

use pharmguard_core::models::{MISSING_GENOTYPE, Variant, normalize_chrom};

use crate::error::ExtractError;

const CHROM: usize = 0;
const POS: usize = 1;
const ID: usize = 2;
const REF: usize = 3;
const ALT: usize = 4;
const QUAL: usize = 5;
const INFO: usize = 7;
const FORMAT: usize = 8;
const FIRST_SAMPLE: usize = 9;

/// Columns every VCF data line must carry (CHROM through INFO).
pub const MIN_COLUMNS: usize = 8;

///
/// Parse one VCF data line that the coordinate filter attributed to `gene`.
///
/// Only the first sample column is read. REF and ALT are carried verbatim.
///
pub fn extract_variant(line: &str, gene: &str) -> Result<Variant, ExtractError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_COLUMNS {
        return Err(ExtractError::TooFewColumns(fields.len()));
    }

    let position = fields[POS]
        .trim()
        .parse::<u64>()
        .map_err(|_| ExtractError::InvalidPosition(fields[POS].to_string()))?;

    let ref_allele = fields[REF].trim();
    if ref_allele.is_empty() {
        return Err(ExtractError::MissingAllele("REF"));
    }
    let alt = fields[ALT].trim();
    if alt.is_empty() {
        return Err(ExtractError::MissingAllele("ALT"));
    }

    let (genotype, gq) = parse_sample(
        fields.get(FORMAT).copied(),
        fields.get(FIRST_SAMPLE).copied(),
    )?;

    Ok(Variant {
        ids: collect_ids(fields[ID], fields[INFO]),
        chromosome: normalize_chrom(fields[CHROM]),
        position,
        genotype,
        qual: parse_qual(fields[QUAL]),
        gq,
        gene: gene.to_string(),
        ref_allele: ref_allele.to_string(),
        alt: alt.to_string(),
    })
}

///
/// QUAL as a float; `.`, empty or non-numeric values read as 0.
///
pub fn parse_qual(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|q| q.is_finite())
        .unwrap_or(0.0)
}

///
/// Canonical genotype: allele indices joined by `/`, whether the input was
/// phased (`|`) or not.
///
pub fn normalize_genotype(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return MISSING_GENOTYPE.to_string();
    }
    raw.replace('|', "/")
}

///
/// Identifiers from the ID column plus any `RS=` values in INFO, lowercased
/// and de-duplicated in first-seen order. Bare numeric `RS=` values (the
/// dbSNP INFO convention) gain the `rs` prefix.
///
pub fn collect_ids(id_field: &str, info_field: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    let mut push = |id: String| {
        if !ids.contains(&id) {
            ids.push(id);
        }
    };

    id_field
        .split(';')
        .map(str::trim)
        .filter(|id| !id.is_empty() && *id != ".")
        .for_each(|id| push(id.to_ascii_lowercase()));

    info_field
        .split(';')
        .filter_map(|entry| entry.trim().strip_prefix("RS="))
        .flat_map(|values| values.split(','))
        .map(str::trim)
        .filter(|id| !id.is_empty() && *id != ".")
        .for_each(|id| {
            if id.bytes().all(|b| b.is_ascii_digit()) {
                push(format!("rs{}", id));
            } else {
                push(id.to_ascii_lowercase());
            }
        });

    ids
}

///
/// Pull GT and GQ out of the first sample using the FORMAT keys. A line
/// without FORMAT or sample columns has a missing genotype.
///
fn parse_sample(
    format: Option<&str>,
    sample: Option<&str>,
) -> Result<(String, Option<f64>), ExtractError> {
    let (format, sample) = match (format, sample) {
        (Some(f), Some(s)) if !f.trim().is_empty() => (f.trim(), s.trim()),
        _ => return Ok((MISSING_GENOTYPE.to_string(), None)),
    };

    let keys: Vec<&str> = format.split(':').collect();
    let values: Vec<&str> = sample.split(':').collect();
    if values.len() > keys.len() {
        return Err(ExtractError::FormatMismatch {
            keys: keys.len(),
            values: values.len(),
        });
    }

    let value_of = |key: &str| {
        keys.iter()
            .position(|k| *k == key)
            .and_then(|i| values.get(i).copied())
    };

    let genotype = value_of("GT")
        .map(normalize_genotype)
        .unwrap_or_else(|| MISSING_GENOTYPE.to_string());

    let gq = value_of("GQ")
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ".")
        .map(|v| v.parse::<f64>().unwrap_or(0.0));

    Ok((genotype, gq))
}
