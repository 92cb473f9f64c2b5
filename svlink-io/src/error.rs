use std::io;
use thiserror::Error;

/// Error type for svlink-io operations.
#[derive(Error, Debug)]
pub enum SvIoError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The file could not be opened.
    #[error(transparent)]
    Open(#[from] anyhow::Error),

    #[error("Error parsing hotspot line {line}: {reason}")]
    HotspotParseError { line: usize, reason: String },

    #[error("Error parsing variant line {line}: {reason}")]
    VariantParseError { line: usize, reason: String },

    /// A required column is missing from the variant table header.
    #[error("Variant table has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("Variant table has no header line")]
    MissingHeader,
}

/// Result type alias for svlink-io operations.
pub type Result<T> = std::result::Result<T, SvIoError>;
