use clap::{Command, arg};

pub const PANEL_CMD: &str = "panel";

pub fn create_panel_cli() -> Command {
    Command::new(PANEL_CMD)
        .author("pharmguard")
        .about("Print the gene panel: regions, known allele sites and associated drugs.")
        .arg(arg!(-c --config <config> "Path to a pharmguard TOML config file"))
}
