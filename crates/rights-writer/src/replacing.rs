//! Replacing writer strategy
//!
//! Deletes every object of the class, then writes one new object per rule.

use crate::strategy::{RulesObjectWriter, WriteSummary, WriterError};
use rights_model::{ClassId, Record, SecurityRule};

/// Delete-all-then-recreate strategy
///
/// Every save hands out fresh numbers above the record's high-water mark,
/// so object numbers never carry over from one rule list to the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplacingWriter;

impl ReplacingWriter {
    /// Registry name
    pub const NAME: &'static str = "replace";

    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RulesObjectWriter for ReplacingWriter {
    fn persist_rules(
        &self,
        rules: &[SecurityRule],
        record: &mut Record,
        class: &ClassId,
    ) -> Result<WriteSummary, WriterError> {
        let mut summary = WriteSummary::default();

        for number in record.object_numbers(class).into_iter().rev() {
            record.remove_object(class, number);
            summary.deleted += 1;
        }
        for rule in rules {
            record.add_object(class, rule);
            summary.created += 1;
        }

        tracing::debug!(
            record = %record.id(),
            class = %class,
            "Replaced rights objects: {}",
            summary
        );
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
