use clap::{Command, arg};

pub const ANALYZE_CMD: &str = "analyze";

pub fn create_analyze_cli() -> Command {
    Command::new(ANALYZE_CMD)
        .author("pharmguard")
        .about("Build a pharmacogenomic report (diplotypes, phenotypes, CPIC guidance) from a single-sample VCF.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Path to the VCF file (plain or gzip'd)").required(true))
        .arg(arg!(-d --drug <drug> "Only report recommendations for this drug"))
        .arg(arg!(-c --config <config> "Path to a pharmguard TOML config file"))
        .arg(arg!(-o --output <output> "Write the JSON report here instead of stdout"))
        .arg(arg!(--explain "Attach LLM explanations to every recommendation"))
}
