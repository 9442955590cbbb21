//! # Gantry Core Configuration Errors
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} manifest: {message}")]
    Parse { format: String, message: String },

    #[error("Unknown or unsupported manifest format for path: {path}")]
    UnsupportedFormat { path: PathBuf },
}
