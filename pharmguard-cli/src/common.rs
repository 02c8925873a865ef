use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::debug;

use pharmguard_report::PharmguardConfig;

///
/// The config named by `--config`, or the defaults (built-in tables,
/// enrichment off) when the flag is absent.
///
pub fn load_config(matches: &ArgMatches) -> Result<PharmguardConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => {
            debug!("Loading config from {}", path);
            PharmguardConfig::try_from(Path::new(path))
                .with_context(|| format!("Failed to load config file: {}", path))
        }
        None => Ok(PharmguardConfig::default()),
    }
}
