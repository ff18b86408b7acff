//! Rights Core - rights persistence engine
//!
//! Stores a list of security rules for a scope:
//! - Resolves global, zone and page scopes to the record that holds them
//! - Reconciles the record's rights objects through a pluggable writer
//! - Attributes the change to the acting principal
//! - Hides auto-created preferences records
//! - Saves at most once per call, with optimistic version checks
//!
//! # Core Concepts
//!
//! - [`RightsEngine`]: Entry point; `save_rules` and friends
//! - [`ScopeResolver`]: Scope to [`StorageTarget`] mapping
//! - [`DocumentStore`]: Record persistence seam, with [`InMemoryDocumentStore`]
//! - [`ActorProvider`]: Source of the author attribution
//! - [`EngineConfig`]: Record names, class ids and default writer
//!
//! # Example
//!
//! ```rust
//! use rights_core::{FixedActor, InMemoryDocumentStore, RightsEngine, SaveOutcome};
//! use rights_model::{PrincipalRef, Right, ScopeReference, SecurityRule};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let actor = Arc::new(FixedActor::new(PrincipalRef::new("XWiki.Admin")?));
//! let engine = RightsEngine::new(store, actor)?;
//!
//! let rules = vec![SecurityRule::allow()
//!     .user(PrincipalRef::new("XWiki.Alice")?)
//!     .right(Right::View)
//!     .build()];
//! let scope = ScopeReference::Page("Sandbox.TestPage".parse()?);
//!
//! let outcome = engine.save_rules(Some(&rules[..]), Some(&scope))?;
//! assert!(matches!(outcome, SaveOutcome::Saved { version: 1, .. }));
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod actor;
pub mod config;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod store;

pub use actor::{ActorProvider, FixedActor};
pub use config::EngineConfig;
pub use engine::{RightsEngine, SaveOutcome};
pub use error::{RightsError, StoreError, UNSUPPORTED_SCOPE_MESSAGE};
pub use resolver::{ScopeResolver, StorageTarget};
pub use store::{DocumentStore, InMemoryDocumentStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for saving rights
    pub use crate::{
        ActorProvider, DocumentStore, EngineConfig, FixedActor, InMemoryDocumentStore,
        RightsEngine, RightsError, SaveOutcome, ScopeResolver,
    };
    pub use rights_model::{PrincipalRef, Right, RuleState, ScopeReference, SecurityRule};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
