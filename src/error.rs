use std::path::PathBuf;

use thiserror::Error;

// ─── Import errors ───────────────────────────────────────────────────

/// Errors surfaced by source loading and import task management.
///
/// Per-record lookup misses during reconciliation are expected and are not
/// errors; they never appear here.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("translation source not found: {path}")]
    NotFound { path: PathBuf },

    #[error("unsupported translation source format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to parse {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("an import is already running for this session")]
    ImportInProgress,
}

impl ImportError {
    /// Short machine-readable kind, for diagnostics that want to branch
    /// without matching the full variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::NotFound { .. } => "not_found",
            ImportError::UnsupportedFormat { .. } => "unsupported_format",
            ImportError::ParseError { .. } => "parse_error",
            ImportError::ImportInProgress => "import_in_progress",
        }
    }
}

// ─── Export errors ───────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize entry: {0}")]
    Json(#[from] serde_json::Error),
}
