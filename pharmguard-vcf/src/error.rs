use thiserror::Error;

/// Request-level failure: the buffer is not a usable VCF at all.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VcfError {
    /// No `#`-prefixed header lines before the first data line.
    #[error("Invalid VCF: no header lines found")]
    NoHeader,

    /// A header but not a single non-empty data line.
    #[error("Invalid VCF: no data lines found")]
    NoDataLines,
}

/// Failure to extract a variant from one coordinate-matched line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("expected at least 8 tab-separated columns, found {0}")]
    TooFewColumns(usize),

    #[error("non-numeric POS: {0}")]
    InvalidPosition(String),

    #[error("empty {0} allele")]
    MissingAllele(&'static str),

    #[error("sample has {values} values but FORMAT declares {keys} keys")]
    FormatMismatch { keys: usize, values: usize },
}

impl ExtractError {
    ///
    /// Malformed lines fail VCF's structural minimum and are skipped
    /// silently; everything else is an unparsable variant worth a warning.
    ///
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ExtractError::TooFewColumns(_) | ExtractError::InvalidPosition(_)
        )
    }
}

/// Result type alias for pharmguard-vcf operations.
pub type Result<T> = std::result::Result<T, VcfError>;
