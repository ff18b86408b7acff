//! Rules Object Writers
//!
//! Pluggable reconciliation of a desired rule list against the numbered
//! rights objects a record already holds.
//!
//! # Core Concepts
//!
//! - [`RulesObjectWriter`]: Core trait for reconciliation strategies
//! - [`RecyclingWriter`]: Reuse existing slots in place (default)
//! - [`ReplacingWriter`]: Delete everything, then recreate
//! - [`WriterRegistry`]: Name-based strategy lookup
//!
//! # Example
//!
//! ```rust
//! use rights_model::{ClassId, Record, Right, SecurityRule};
//! use rights_writer::WriterRegistry;
//!
//! let registry = WriterRegistry::with_defaults();
//! let writer = registry.get("recycling").unwrap();
//!
//! let class = ClassId::new("XWiki.XWikiRights");
//! let mut record = Record::new("Main.WebHome".parse().unwrap());
//! let rules = vec![SecurityRule::allow().right(Right::View).build()];
//!
//! let summary = writer.persist_rules(&rules, &mut record, &class).unwrap();
//! assert_eq!(summary.created, 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod recycling;
mod registry;
mod replacing;
mod strategy;

pub use recycling::RecyclingWriter;
pub use registry::WriterRegistry;
pub use replacing::ReplacingWriter;
pub use strategy::{RulesObjectWriter, WriteSummary, WriterError};

/// Name of the strategy used when the caller does not choose one
pub const DEFAULT_WRITER: &str = RecyclingWriter::NAME;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
