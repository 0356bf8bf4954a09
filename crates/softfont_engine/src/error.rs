//! Unified error types for softfont_engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for softfont_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file '{path}': {message}")]
    ReadFile { path: PathBuf, message: String },

    // === Loading Errors ===
    #[error("Not a valid soft font file (no font definition control string found)")]
    NoFontDefinition,
}
