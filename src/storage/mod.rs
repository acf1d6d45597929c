//! Loading of the usage log. The log lives in a single JSON document of the form
//! `{"<date>": {"<key>": <seconds>, ...}, ...}` and is read once at startup.

pub mod log_file;

use std::{future::Future, io, path::PathBuf};

use thiserror::Error;

use crate::analysis::log::UsageLog;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file '{}' not found", path.display())]
    NotFound { path: PathBuf },
    #[error("invalid JSON format - {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Interface for abstracting where a [UsageLog] comes from.
pub trait LogSource {
    /// Reads and parses the whole log.
    fn load(&self) -> impl Future<Output = Result<UsageLog, LoadError>>;
}
