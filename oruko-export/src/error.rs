//! Error types for card export

use resvg::usvg;
use std::path::PathBuf;
use thiserror::Error;

/// Why an export failed
///
/// Export errors stay local to the export: the card and the lookup that
/// produced it are left as they were.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to lay out card: {0}")]
    Layout(#[from] usvg::Error),

    /// No font could draw the named layer's text
    #[error("no font available to draw the {0} text")]
    MissingText(&'static str),

    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to load font {path}: {source}")]
    Font {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rasterization task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
