//! Rights Model
//!
//! Value types exchanged with callers of the rights persistence engine.
//!
//! # Core Concepts
//!
//! - [`SecurityRule`]: who is allowed or denied which [`Right`]s
//! - [`ScopeReference`]: where in the content tree a rule list applies
//! - [`Record`]: store-owned container of numbered [`RightsObject`] slots
//! - [`ZonePath`] / [`RecordId`]: hierarchical addressing
//!
//! # Example
//!
//! ```rust
//! use rights_model::{ClassId, PrincipalRef, Record, Right, SecurityRule};
//!
//! let rule = SecurityRule::allow()
//!     .user(PrincipalRef::new("XWiki.Admin").unwrap())
//!     .right(Right::View)
//!     .build();
//!
//! let class = ClassId::new("XWiki.XWikiRights");
//! let mut record = Record::new("Main.WebHome".parse().unwrap());
//! assert_eq!(record.add_object(&class, &rule), 0);
//! assert_eq!(record.rules(&class).unwrap(), vec![rule]);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod path;
mod record;
mod rule;
mod scope;

pub use error::ModelError;
pub use path::{ObjectRef, PageRef, RecordId, ZonePath};
pub use record::{ClassId, ObjectFields, Record, RightsObject};
pub use rule::{
    CustomRight, PrincipalRef, Right, RuleState, SecurityRule, SecurityRuleBuilder, ALLOW_FIELD,
    GROUPS_FIELD, LEVELS_FIELD, USERS_FIELD,
};
pub use scope::ScopeReference;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
