use thiserror::Error;

use svlink_core::errors::ConfigError;
use svlink_index::IndexError;

#[derive(Error, Debug)]
pub enum LinkageError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Soft filters given for unknown variant: {0}")]
    UnknownVariant(String),
}
