//! Error types for the rights engine
//!
//! Provides error handling for:
//! - Unsupported scope references
//! - Unknown or failing writer strategies
//! - Document store load/save failures
//! - Invalid configuration

use rights_model::{ModelError, RecordId};
use rights_writer::WriterError;

/// Message carried by [`RightsError::UnsupportedScope`]
pub const UNSUPPORTED_SCOPE_MESSAGE: &str = "Could not set rights for the given reference.";

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum RightsError {
    /// Scope reference kind cannot hold rights
    #[error("{}", UNSUPPORTED_SCOPE_MESSAGE)]
    UnsupportedScope {
        /// Kind of the rejected reference
        kind: &'static str,
    },

    /// Requested writer strategy is not registered
    #[error("strategy not found: {0}")]
    StrategyNotFound(String),

    /// Writer strategy failed
    #[error("writer failed: {0}")]
    Writer(WriterError),

    /// Document store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl RightsError {
    /// Check if the error reports a lost optimistic-concurrency race
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Store(StoreError::Conflict { .. }))
    }

    /// Check if the error was raised before anything was loaded
    #[inline]
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedScope { .. } | Self::StrategyNotFound(_) | Self::Config(_)
        )
    }
}

impl From<WriterError> for RightsError {
    fn from(err: WriterError) -> Self {
        match err {
            WriterError::StrategyNotFound(name) => Self::StrategyNotFound(name),
            other => Self::Writer(other),
        }
    }
}

impl From<ModelError> for RightsError {
    fn from(err: ModelError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Document store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Record does not exist
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Record changed since it was loaded
    #[error("version conflict on {record}: expected {expected}, found {actual}")]
    Conflict {
        /// Record being saved
        record: RecordId,
        /// Version the caller loaded
        expected: u64,
        /// Version currently stored
        actual: u64,
    },

    /// Backend failure
    #[error("store backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_scope_message_is_fixed() {
        let err = RightsError::UnsupportedScope { kind: "object" };
        assert_eq!(err.to_string(), UNSUPPORTED_SCOPE_MESSAGE);
        assert!(err.is_caller_error());
    }

    #[test]
    fn strategy_not_found_is_lifted() {
        let err = RightsError::from(WriterError::StrategyNotFound("bogus".into()));
        assert!(matches!(err, RightsError::StrategyNotFound(ref name) if name == "bogus"));
    }

    #[test]
    fn writer_failure_is_wrapped() {
        let err = RightsError::from(WriterError::Strategy {
            strategy: "recycling",
            message: "boom".into(),
        });
        assert!(matches!(err, RightsError::Writer(_)));
        assert!(!err.is_caller_error());
    }

    #[test]
    fn store_errors_surface_unchanged() {
        let record: RecordId = "Main.WebHome".parse().unwrap();
        let err = RightsError::from(StoreError::Conflict {
            record,
            expected: 1,
            actual: 2,
        });
        assert!(err.is_conflict());
        assert_eq!(
            err.to_string(),
            "version conflict on Main.WebHome: expected 1, found 2"
        );
    }
}
