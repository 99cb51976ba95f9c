// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types shared by every layer of the crate.
//!
//! Only conditions that prevent producing output are errors. Problems with a
//! single input line are reported as [`LineWarning`](crate::draws::LineWarning)
//! values instead and never abort a load.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the enumerator, codecs, loader and engines.
#[derive(Debug, Error)]
pub enum Error {
    /// An input could not be read or an output could not be written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stream (not tied to a named file) failed.
    #[error("I/O error: {0}")]
    Stream(#[from] io::Error),

    /// Arguments rejected before any processing begins.
    #[error("validation error: {0}")]
    Validation(String),

    /// A tuple that does not satisfy the combination invariant.
    #[error("invalid combination {numbers:?}: {reason}")]
    InvalidCombination { numbers: Vec<u8>, reason: String },

    /// A rank outside `[0, C(n,k))`.
    #[error("rank {rank} out of range for universe of size {size}")]
    RankOutOfRange { rank: u64, size: u64 },

    /// A text record token is not a pure non-negative integer.
    #[error("cannot parse {token:?} in text record {record:?}")]
    TextParse { record: String, token: String },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A full-space scan was stopped by its cancellation token.
    #[error("scan cancelled after {draws_completed} completed draws")]
    Cancelled { draws_completed: usize },
}

impl Error {
    /// Wrap an `io::Error` with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = Error::io(
            "draws.txt",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        let message = err.to_string();
        assert!(message.contains("draws.txt"));
        assert!(message.contains("missing"));
    }

    #[test]
    fn test_validation_message() {
        let err = Error::validation("max_play must be 6 or 7, got 5");
        assert_eq!(
            err.to_string(),
            "validation error: max_play must be 6 or 7, got 5"
        );
    }
}
