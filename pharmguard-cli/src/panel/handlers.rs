use anyhow::{Context, Result};
use clap::ArgMatches;

use pharmguard_core::ReferenceData;

use crate::common::load_config;

pub fn run_panel(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let reference = config
        .load_reference()
        .context("Failed to load reference tables")?;

    print!("{}", format_panel(&reference));

    Ok(())
}

///
/// One tab-separated row per panel gene, in panel order, under a header.
///
pub fn format_panel(reference: &ReferenceData) -> String {
    let mut out = String::from("gene\tchrom\tstart\tend\tsites\tdrugs\n");
    for gene in reference.panel.genes() {
        let drugs = reference.recommendations.drugs(gene.name()).join(",");
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            gene.name(),
            gene.region.chr,
            gene.region.start,
            gene.region.end,
            gene.sites.len(),
            if drugs.is_empty() { "-" } else { drugs.as_str() }
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_format_builtin_panel() {
        let reference = ReferenceData::builtin().unwrap();
        let table = format_panel(&reference);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "gene\tchrom\tstart\tend\tsites\tdrugs");
        assert_eq!(lines[3], "CYP2C9\t10\t94938683\t94989390\t2\tWARFARIN");
        assert_eq!(lines[6], "DPYD\t1\t97077743\t97921034\t3\tFLUOROURACIL,CAPECITABINE");
    }
}
