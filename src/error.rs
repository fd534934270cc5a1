use std::path::PathBuf;
use thiserror::Error;

/// Errors while building a sentence bank
#[derive(Debug, Error)]
pub enum BankError {
    #[error("sentence bank has no usable sentences")]
    Empty,

    #[error("unknown sentence set {0:?}")]
    UnknownSet(String),

    #[error("failed to read sentences from {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sentence set {name}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
