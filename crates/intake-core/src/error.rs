//! Error types for the intake-core library.
//!
//! Extraction, validation, code mapping and checklist evaluation never fail;
//! gaps in the input are reported as absent fields or [`Issue`](crate::Issue)
//! entries. The errors below cover the edges of the pipeline: loading
//! documents, reading configuration and writing audit records.

use thiserror::Error;

/// Main error type for the intake library.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// Document loading error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Audit sink failed to record an entry.
    #[error("audit error: {0}")]
    Audit(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to loading document text from disk.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to read the file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// PDF support was compiled out.
    #[error("PDF support is not enabled (build with the `pdf` feature)")]
    PdfUnsupported,
}

/// Result type for the intake library.
pub type Result<T> = std::result::Result<T, IntakeError>;
