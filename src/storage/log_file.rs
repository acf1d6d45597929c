use std::{io::ErrorKind, path::PathBuf};

use tracing::{debug, info, warn};

use crate::analysis::log::UsageLog;

use super::{LoadError, LogSource};

/// The main realization of [LogSource]: a JSON file on disk.
pub struct JsonLogFile {
    path: PathBuf,
}

impl JsonLogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogSource for JsonLogFile {
    async fn load(&self) -> Result<UsageLog, LoadError> {
        debug!("Reading {:?}", self.path);
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Log file {:?} is missing", self.path);
                return Err(LoadError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(source) => {
                return Err(LoadError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let log = serde_json::from_str::<UsageLog>(&content).inspect_err(|e| {
            warn!("Log file {:?} is not a valid usage log: {e}", self.path);
        })?;
        info!("Loaded {} days from {:?}", log.day_count(), self.path);
        Ok(log)
    }
}
