use std::io;
use thiserror::Error;

use pharmguard_core::ReferenceDataError;
use pharmguard_vcf::VcfError;

/// Error type for a single analysis request.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The buffer is not a usable VCF; nothing was computed.
    #[error("Invalid VCF input: {0}")]
    InvalidInput(#[from] VcfError),
}

/// Error type for loading a pharmguard config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file must have a `toml` extension: {0}")]
    InvalidFileType(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Reference(#[from] ReferenceDataError),
}

/// Error type for one explanation request. Never escapes enrichment.
#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("API key environment variable `{0}` is not set")]
    MissingApiKey(String),
    #[error("Explanation request failed: {0}")]
    Request(String),
    #[error("Explanation response was empty")]
    EmptyResponse,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<ureq::Error> for ExplainError {
    fn from(err: ureq::Error) -> Self {
        ExplainError::Request(err.to_string())
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
