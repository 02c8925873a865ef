use thiserror::Error;

/// Errors raised while building the reference tables. These are fatal at
/// startup: nothing can be analyzed without a valid panel.
#[derive(Error, Debug)]
pub enum ReferenceDataError {
    #[error("Can't read reference file: {0}")]
    FileReadError(String),

    #[error("Malformed reference table {table}: {source}")]
    JsonError {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Gene panel is empty")]
    EmptyPanel,

    #[error("Invalid region for {gene}: start {start} is greater than end {end}")]
    InvalidRegion { gene: String, start: u64, end: u64 },

    #[error("Regions for {first} and {second} overlap on chromosome {chr}")]
    OverlappingRegions {
        first: String,
        second: String,
        chr: String,
    },

    #[error("Site {rsid} ({allele}) at {pos} lies outside the {gene} region")]
    SiteOutsideRegion {
        gene: String,
        rsid: String,
        allele: String,
        pos: u64,
    },
}
