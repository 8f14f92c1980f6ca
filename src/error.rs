use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading recordings or settings.
///
/// The per-frame core never produces these; absence conditions there are
/// handled as plain `Option` branches.
#[derive(Debug, Error)]
pub enum HandpointerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported schemaVersion in {path}: expected {expected}, got {found}")]
    UnsupportedSchema {
        path: PathBuf,
        expected: u32,
        found: u32,
    },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("invalid frame at ts={ts}: expected at least 21 landmarks, got {count}")]
    InvalidFrame { ts: u64, count: usize },
}

pub type Result<T> = std::result::Result<T, HandpointerError>;
