use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use pharmguard_core::utils::read_to_buffer;
use pharmguard_vcf::{ParsedVcf, RegionIndex, parse_vcf};

use crate::common::load_config;

pub fn run_validate(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("A path to a VCF file is required.");

    let config = load_config(matches)?;
    let reference = config
        .load_reference()
        .context("Failed to load reference tables")?;
    let index = RegionIndex::from_panel(&reference.panel);

    let buffer = read_to_buffer(Path::new(input))
        .with_context(|| format!("Failed to read VCF file: {}", input))?;
    let parsed =
        parse_vcf(&buffer, &index).with_context(|| format!("{} is not a usable VCF", input))?;

    print!("{}", format_summary(&parsed));

    Ok(())
}

pub fn format_summary(parsed: &ParsedVcf) -> String {
    let mut out = format!(
        "sample\t{}\nlines_scanned\t{}\ntarget_variants\t{}\nmalformed_lines\t{}\nunparsable_lines\t{}\n",
        parsed.sample_id,
        parsed.total_lines_scanned,
        parsed.variants.len(),
        parsed.malformed_lines,
        parsed.unparsable_lines
    );
    for variant in &parsed.variants {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            variant.gene,
            variant.id_or_locus(),
            variant.genotype
        ));
    }
    out
}
