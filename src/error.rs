//! Error types of training and model I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Caller-visible failures.
///
/// Zero-weight rows in normalization and zero-credit target words in the
/// update step are not errors and never surface here.
#[derive(Error, Debug)]
pub enum Ibm0Error {
    /// A sentence pair with an empty token sequence
    #[error("Malformed sentence pair #{index}: {reason}")]
    MalformedInput { index: usize, reason: String },

    /// Iteration count must be a positive integer
    #[error("Invalid iteration count: {0} (must be >= 1)")]
    InvalidIterationCount(usize),

    /// Source and target corpora are not line-aligned
    #[error("Corpus length mismatch: {source_lines} source lines vs {target_lines} target lines")]
    LengthMismatch {
        source_lines: usize,
        target_lines: usize,
    },

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// I/O error on a stream without a path
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed record in a tab-separated model file
    #[error("Parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Ibm0Error>;
