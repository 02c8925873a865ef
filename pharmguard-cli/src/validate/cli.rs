use clap::{Command, arg};

pub const VALIDATE_CMD: &str = "validate";

pub fn create_validate_cli() -> Command {
    Command::new(VALIDATE_CMD)
        .author("pharmguard")
        .about("Check that a VCF is readable and report what the line reader found.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Path to the VCF file (plain or gzip'd)").required(true))
        .arg(arg!(-c --config <config> "Path to a pharmguard TOML config file"))
}
