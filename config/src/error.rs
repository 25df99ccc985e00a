use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read chain definition at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse chain definition: {source}")]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },
    #[error("chain-word `{word}` uses `merge_key` without a `key`")]
    MissingKey { word: String },
}

impl ConfigError {
    /// The file the error came from, if it was loaded from disk.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } => Some(path),
            ConfigError::Parse { path, .. } => path.as_deref(),
            ConfigError::MissingKey { .. } => None,
        }
    }
}
