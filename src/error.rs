
use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TunedError {
    #[error("endpoint {0} missing or not writable")]
    Unwritable(PathBuf),

    #[error("endpoint {0} missing or not readable")]
    Unreadable(PathBuf),

    #[error("write to {path} failed: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown tunable key: {0}")]
    UnknownTunable(String),

    #[error("invalid thermal state {0:?}")]
    InvalidState(String),
}
