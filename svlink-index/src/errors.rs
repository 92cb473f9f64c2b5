use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IndexError {
    #[error("Variant not found: {0}")]
    NotFound(String),

    #[error("Duplicate variant id: {0}")]
    DuplicateId(String),

    #[error("Variant {id} names {mate_id} as its mate, but {mate_id} does not point back")]
    MateMismatch { id: String, mate_id: String },

    #[error("Invalid variant record: {0}")]
    InvalidRecord(String),
}
