use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting the surface as a PNG
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Surface has no drawable area ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("Cannot allocate a {width}x{height} bitmap")]
    Allocation { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Browser download failed: {0}")]
    Download(String),

    #[error("Export was cancelled before it completed")]
    Canceled,
}

/// Errors that can occur while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),

    #[error("Palette must contain at least one color")]
    EmptyPalette,
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
