//! Error types for tlcap.
//!
//! Errors are split by layer using `thiserror`:
//!
//! - [`ExtractError`] - a single response could not be turned into entities.
//!   Always caught at the interceptor boundary; never fatal.
//! - [`InputError`] - the capture source (file or stdin) could not be read.
//! - [`AppError`] - top-level error for the replay binary, wrapping the
//!   others via `From` so `?` composes across layers.
//!
//! # Recovery Strategy
//!
//! Extraction is all-or-nothing per response: the first failing entry aborts
//! the response, the store for that operation is left untouched, and the
//! failure is reported as a diagnostic plus a banner event. Other operations
//! and later responses are unaffected.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for the replay host.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read captured exchanges.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Configuration could not be loaded or resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// An operation URL pattern failed to compile.
    #[error("Invalid operation pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Failed to serialize or write store contents.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Terminal or pipe error while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when reading captured exchanges.
#[derive(Debug, Error)]
pub enum InputError {
    /// The capture file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tlcap::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// No capture file was given and stdin is an interactive terminal.
    #[error("No input source: provide a capture file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O failure while reading.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while extracting entities from one response.
///
/// Non-entity entries (cursors, modules, other item kinds) are never errors;
/// they map to `Ok(None)` and are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The body is not valid JSON.
    #[error("Invalid JSON response body: {message}")]
    InvalidJson {
        /// Parser message from `serde_json`.
        message: String,
    },

    /// The body lacks the expected path to the instruction list.
    ///
    /// Signals that the upstream shape changed, or that the response is an
    /// error or empty payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use tlcap::model::error::ExtractError;
    ///
    /// let err = ExtractError::ShapeMismatch {
    ///     path: "data.user.result".to_string(),
    ///     missing: "result".to_string(),
    /// };
    /// assert!(err.to_string().contains("'result'"));
    /// ```
    #[error("Unexpected response shape: missing '{missing}' in path '{path}'")]
    ShapeMismatch {
        /// Full dotted path that was being followed.
        path: String,
        /// First segment that could not be resolved (or that did not decode).
        missing: String,
    },

    /// An entry's content could not be coerced to the expected entity.
    #[error("Failed to map entry '{entry_id}': {reason}")]
    EntryMappingFailure {
        /// `entryId` of the offending entry, or `"<unknown>"`.
        entry_id: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl ExtractError {
    /// Build an `EntryMappingFailure` for an entry that may lack an id.
    pub fn entry(entry_id: Option<&str>, reason: impl Into<String>) -> Self {
        Self::EntryMappingFailure {
            entry_id: entry_id.unwrap_or(UNKNOWN_ENTRY_ID).to_string(),
            reason: reason.into(),
        }
    }
}

/// Placeholder used when an entry carries no `entryId`.
pub const UNKNOWN_ENTRY_ID: &str = "<unknown>";
