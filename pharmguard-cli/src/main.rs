mod analyze;
mod common;
mod panel;
mod validate;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "pharmguard";
    pub const BIN_NAME: &str = "pharmguard";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("pharmguard")
        .about("Deterministic pharmacogenomic reports from single-sample VCF files: star-allele diplotypes, activity scores, metabolizer phenotypes and CPIC drug guidance.")
        .subcommand_required(true)
        .subcommand(analyze::cli::create_analyze_cli())
        .subcommand(panel::cli::create_panel_cli())
        .subcommand(validate::cli::create_validate_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(consts::DEFAULT_LOG_LEVEL),
    )
    .init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // ANALYZE
        //
        Some((analyze::cli::ANALYZE_CMD, matches)) => {
            analyze::handlers::run_analyze(matches)?;
        }

        //
        // PANEL
        //
        Some((panel::cli::PANEL_CMD, matches)) => {
            panel::handlers::run_panel(matches)?;
        }

        //
        // VALIDATE
        //
        Some((validate::cli::VALIDATE_CMD, matches)) => {
            validate::handlers::run_validate(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
