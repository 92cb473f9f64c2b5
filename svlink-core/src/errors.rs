use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid orientation: {0}")]
    InvalidOrientation(String),

    #[error("Confidence interval [{min}, {max}] does not contain start {start} for variant {id}")]
    InvalidConfidenceInterval {
        id: String,
        start: u32,
        min: u32,
        max: u32,
    },
}

#[derive(Error, Debug)]
pub enum ContigOrderError {
    #[error("Can't read contig file: {0}")]
    FileReadError(String),

    #[error("Error parsing contig line: {0}")]
    ContigParseError(String),

    #[error("Contig file contains no contigs: {0}")]
    EmptyContigFile(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
