//! Recycling writer strategy
//!
//! Default strategy: reuse existing slots in number order.
//! Minimal churn, stable low numbers.

use crate::strategy::{RulesObjectWriter, WriteSummary, WriterError};
use rights_model::{ClassId, Record, SecurityRule};

/// Recycling strategy: overwrite existing slots in place
///
/// # Characteristics
/// - Existing slot `i` (by ascending number) receives rule `i`
/// - Slots already holding their rule are not touched
/// - Extra rules get new slots above the high-water mark
/// - Extra slots are deleted, highest number first
#[derive(Debug, Clone, Copy, Default)]
pub struct RecyclingWriter;

impl RecyclingWriter {
    /// Registry name
    pub const NAME: &'static str = "recycling";

    /// Create new recycling writer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RulesObjectWriter for RecyclingWriter {
    fn persist_rules(
        &self,
        rules: &[SecurityRule],
        record: &mut Record,
        class: &ClassId,
    ) -> Result<WriteSummary, WriterError> {
        let existing = record.object_numbers(class);
        let mut summary = WriteSummary::default();

        for (number, rule) in existing.iter().zip(rules) {
            let slot = record.object_mut(class, *number).ok_or_else(|| WriterError::Strategy {
                strategy: Self::NAME,
                message: format!("object {class}[{number}] vanished during reconciliation"),
            })?;
            if slot.write_rule(rule) {
                summary.updated += 1;
            } else {
                summary.unchanged += 1;
            }
        }

        for rule in rules.iter().skip(existing.len()) {
            let number = record.add_object(class, rule);
            tracing::trace!("Appended {}[{}]", class, number);
            summary.created += 1;
        }

        for number in existing.iter().skip(rules.len()).rev() {
            record.remove_object(class, *number);
            tracing::trace!("Deleted {}[{}]", class, number);
            summary.deleted += 1;
        }

        tracing::debug!(
            record = %record.id(),
            class = %class,
            "Recycled rights objects: {}",
            summary
        );
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
