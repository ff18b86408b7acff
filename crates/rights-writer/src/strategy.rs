//! Writer strategy trait and core types
//!
//! Provides the [`RulesObjectWriter`] trait for pluggable reconciliation of a
//! desired rule list against the rights objects already held by a record.

use rights_model::{ClassId, Record, SecurityRule};

/// Reconciliation strategy for rights objects
///
/// # Contract
/// When `persist_rules` returns `Ok`, `record` holds exactly one object of
/// `class` per rule in `rules`, in the same order by ascending number, and no
/// other object of `class`. Objects of other classes are left untouched.
/// Implementations differ only in which numbers they reuse.
pub trait RulesObjectWriter: Send + Sync + std::fmt::Debug {
    /// Rewrite the objects of `class` in `record` to match `rules`
    ///
    /// # Errors
    /// Returns error if the strategy cannot apply the rules to this record
    fn persist_rules(
        &self,
        rules: &[SecurityRule],
        record: &mut Record,
        class: &ClassId,
    ) -> Result<WriteSummary, WriterError>;

    /// Registry name of this strategy
    fn name(&self) -> &'static str;
}

/// What a strategy did to a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// New objects appended
    pub created: usize,

    /// Existing objects whose fields were rewritten
    pub updated: usize,

    /// Existing objects that already matched their rule
    pub unchanged: usize,

    /// Objects deleted
    pub deleted: usize,
}

impl WriteSummary {
    /// True when the record was not modified at all
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.deleted == 0
    }
}

impl std::fmt::Display for WriteSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} unchanged, {} deleted",
            self.created, self.updated, self.unchanged, self.deleted
        )
    }
}

/// Writer errors
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// No strategy registered under this name
    #[error("no rules object writer registered as '{0}'")]
    StrategyNotFound(String),

    /// Strategy-specific failure
    #[error("{strategy}: {message}")]
    Strategy {
        /// Strategy name
        strategy: &'static str,
        /// Failure description
        message: String,
    },
}
