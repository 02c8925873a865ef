use std::ffi::OsStr;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use pharmguard_core::ReferenceData;

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BUDGET_SECS: u64 = 25;

/// Optional replacements for the compiled-in reference tables.
#[derive(Deserialize, Serialize, Debug, PartialEq, Default, Clone)]
#[serde(default)]
pub struct ReferenceConfig {
    pub gene_panel: Option<PathBuf>,
    pub allele_scores: Option<PathBuf>,
    pub recommendations: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(default)]
pub struct ExplainConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key, never the key.
    pub api_key_env: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Wall-clock budget for the whole enrichment fan-out.
    pub budget_secs: u64,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        ExplainConfig {
            enabled: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            budget_secs: DEFAULT_BUDGET_SECS,
        }
    }
}

impl ExplainConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.budget_secs)
    }
}

///
/// Top-level pharmguard configuration. Every section is optional; an empty
/// file yields the built-in tables with enrichment disabled.
///
#[derive(Deserialize, Serialize, Debug, PartialEq, Default, Clone)]
#[serde(default)]
pub struct PharmguardConfig {
    pub reference: ReferenceConfig,
    pub explain: ExplainConfig,
}

impl PharmguardConfig {
    ///
    /// Build the reference tables this config points at, falling back to
    /// the compiled-in table for every path left unset.
    ///
    pub fn load_reference(&self) -> ConfigResult<ReferenceData> {
        let reference = ReferenceData::from_paths(
            self.reference.gene_panel.as_deref(),
            self.reference.allele_scores.as_deref(),
            self.reference.recommendations.as_deref(),
        )?;
        Ok(reference)
    }
}

impl TryFrom<&Path> for PharmguardConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        match path.extension().and_then(OsStr::to_str) {
            Some("toml") => {}
            _ => return Err(ConfigError::InvalidFileType(path.display().to_string())),
        }

        let toml_str = read_to_string(path)?;
        let mut config: PharmguardConfig = toml::from_str(&toml_str)?;

        // table paths are relative to the config file
        if let Some(parent) = path.parent() {
            config.reference.resolve_relative_to(parent);
        }

        Ok(config)
    }
}

impl ReferenceConfig {
    fn resolve_relative_to(&mut self, dir: &Path) {
        for table in [
            &mut self.gene_panel,
            &mut self.allele_scores,
            &mut self.recommendations,
        ] {
            if let Some(p) = table.as_mut() {
                if p.is_relative() {
                    *p = dir.join(&*p);
                }
            }
        }
    }
}
