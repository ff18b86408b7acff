//! Rights persistence engine
//!
//! Turns "these rules apply to that scope" into exactly zero or one record
//! save:
//! - Resolves the scope to a storage target
//! - Reconciles a private copy of the stored record with a writer strategy
//! - Stamps author and hidden flag, then saves unless there is nothing to keep

use crate::actor::ActorProvider;
use crate::config::EngineConfig;
use crate::error::RightsError;
use crate::resolver::{ScopeResolver, StorageTarget};
use crate::store::DocumentStore;
use rights_model::{Record, RecordId, ScopeReference, SecurityRule};
use rights_writer::{RulesObjectWriter, WriteSummary, WriterRegistry};
use std::fmt;
use std::sync::Arc;

/// Result of a save call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Rules or scope were absent; nothing was touched
    Skipped,
    /// Empty rule list on a record that does not exist yet
    NotPersisted {
        /// Record that would have been created
        record: RecordId,
    },
    /// Record was written
    Saved {
        /// Saved record
        record: RecordId,
        /// Version assigned by the store
        version: u64,
        /// Object changes made by the writer
        summary: WriteSummary,
    },
}

impl SaveOutcome {
    /// Check if the store was written
    #[inline]
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    /// Version assigned by the store, if saved
    #[must_use]
    pub fn version(&self) -> Option<u64> {
        match self {
            Self::Saved { version, .. } => Some(*version),
            _ => None,
        }
    }
}

enum WriterChoice<'a> {
    Named(&'a str),
    Given(&'a dyn RulesObjectWriter),
}

/// Persists security rules for a scope
///
/// Holds no mutable state, so one engine can serve many threads.
/// Concurrent saves to the same record race at the store, which reports
/// the loser as a conflict.
pub struct RightsEngine {
    config: EngineConfig,
    resolver: ScopeResolver,
    registry: WriterRegistry,
    store: Arc<dyn DocumentStore>,
    actor: Arc<dyn ActorProvider>,
}

impl RightsEngine {
    /// Create engine with default configuration and built-in writers
    ///
    /// # Errors
    /// Returns error if the default configuration is unusable
    pub fn new(
        store: Arc<dyn DocumentStore>,
        actor: Arc<dyn ActorProvider>,
    ) -> Result<Self, RightsError> {
        Self::from_parts(
            EngineConfig::default(),
            WriterRegistry::with_defaults(),
            store,
            actor,
        )
    }

    /// Create engine from explicit parts
    ///
    /// # Errors
    /// Returns [`RightsError::Config`] if the configuration is invalid and
    /// [`RightsError::StrategyNotFound`] if its default strategy is not
    /// registered
    pub fn from_parts(
        config: EngineConfig,
        registry: WriterRegistry,
        store: Arc<dyn DocumentStore>,
        actor: Arc<dyn ActorProvider>,
    ) -> Result<Self, RightsError> {
        let resolver = ScopeResolver::new(&config)?;
        if !registry.contains(&config.default_strategy) {
            return Err(RightsError::StrategyNotFound(config.default_strategy));
        }
        tracing::debug!(
            "Rights engine ready: default strategy {}, writers {:?}",
            config.default_strategy,
            registry.names()
        );
        Ok(Self {
            config,
            resolver,
            registry,
            store,
            actor,
        })
    }

    /// Replace the configuration
    ///
    /// # Errors
    /// Same as [`RightsEngine::from_parts`]
    pub fn with_config(self, config: EngineConfig) -> Result<Self, RightsError> {
        Self::from_parts(config, self.registry, self.store, self.actor)
    }

    /// Replace the writer registry
    ///
    /// # Errors
    /// Same as [`RightsEngine::from_parts`]
    pub fn with_registry(self, registry: WriterRegistry) -> Result<Self, RightsError> {
        Self::from_parts(self.config, registry, self.store, self.actor)
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &WriterRegistry {
        &self.registry
    }

    /// Storage target of a scope
    ///
    /// # Errors
    /// Returns [`RightsError::UnsupportedScope`] for unsupported kinds
    #[inline]
    pub fn resolve(&self, scope: &ScopeReference) -> Result<StorageTarget, RightsError> {
        self.resolver.resolve(scope)
    }

    /// Save rules with the configured default writer
    ///
    /// Passing `None` for either argument does nothing and returns
    /// [`SaveOutcome::Skipped`].
    ///
    /// # Errors
    /// Returns error if the scope is unsupported or the store fails
    pub fn save_rules(
        &self,
        rules: Option<&[SecurityRule]>,
        scope: Option<&ScopeReference>,
    ) -> Result<SaveOutcome, RightsError> {
        self.run(rules, scope, WriterChoice::Named(&self.config.default_strategy))
    }

    /// Save rules with a writer picked by name
    ///
    /// # Errors
    /// Returns [`RightsError::StrategyNotFound`] if `strategy` is not
    /// registered, plus everything [`RightsEngine::save_rules`] returns
    pub fn save_rules_with(
        &self,
        rules: Option<&[SecurityRule]>,
        scope: Option<&ScopeReference>,
        strategy: &str,
    ) -> Result<SaveOutcome, RightsError> {
        self.run(rules, scope, WriterChoice::Named(strategy))
    }

    /// Save rules with a writer supplied by the caller
    ///
    /// # Errors
    /// Same as [`RightsEngine::save_rules`], plus writer failures
    pub fn save_rules_using(
        &self,
        rules: Option<&[SecurityRule]>,
        scope: Option<&ScopeReference>,
        writer: &dyn RulesObjectWriter,
    ) -> Result<SaveOutcome, RightsError> {
        self.run(rules, scope, WriterChoice::Given(writer))
    }

    fn run(
        &self,
        rules: Option<&[SecurityRule]>,
        scope: Option<&ScopeReference>,
        choice: WriterChoice<'_>,
    ) -> Result<SaveOutcome, RightsError> {
        let (Some(rules), Some(scope)) = (rules, scope) else {
            tracing::warn!("Rights save skipped: rules or scope missing");
            return Ok(SaveOutcome::Skipped);
        };

        let target = self.resolver.resolve(scope)?;
        let loaded = self.store.load(&target.record)?;
        let mut working = Record::clone(&loaded);

        let named;
        let writer: &dyn RulesObjectWriter = match choice {
            WriterChoice::Named(name) => {
                named = self.registry.get(name)?;
                named.as_ref()
            }
            WriterChoice::Given(writer) => writer,
        };

        let summary = writer.persist_rules(rules, &mut working, &target.class)?;
        tracing::debug!(
            "Reconciled {} with {}: {}",
            target.record,
            writer.name(),
            summary
        );

        working.set_author(self.actor.current_actor());
        if working.is_new() && target.is_derived_preferences_record {
            working.set_hidden(true);
        }

        if rules.is_empty() && working.is_new() {
            tracing::warn!(
                "Not persisting {}: no rules and record does not exist",
                target.record
            );
            return Ok(SaveOutcome::NotPersisted {
                record: target.record,
            });
        }

        match self.store.save(working) {
            Ok(version) => {
                tracing::info!(
                    "Saved rights on {} (version {}): {}",
                    target.record,
                    version,
                    summary
                );
                Ok(SaveOutcome::Saved {
                    record: target.record,
                    version,
                    summary,
                })
            }
            Err(e) => {
                tracing::error!("Saving rights on {} failed: {}", target.record, e);
                Err(e.into())
            }
        }
    }
}

impl fmt::Debug for RightsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RightsEngine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::FixedActor;
    use crate::error::StoreError;
    use crate::store::InMemoryDocumentStore;
    use rights_model::{PrincipalRef, Right};
    use rights_writer::WriterError;

    #[derive(Debug)]
    struct FailingWriter;

    impl RulesObjectWriter for FailingWriter {
        fn persist_rules(
            &self,
            _rules: &[SecurityRule],
            _record: &mut Record,
            _class: &rights_model::ClassId,
        ) -> Result<WriteSummary, WriterError> {
            Err(WriterError::Strategy {
                strategy: "failing",
                message: "refused".into(),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct BrokenStore;

    impl DocumentStore for BrokenStore {
        fn load(&self, id: &RecordId) -> Result<Arc<Record>, StoreError> {
            Ok(Arc::new(Record::new(id.clone())))
        }

        fn save(&self, _record: Record) -> Result<u64, StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }

        fn exists(&self, _id: &RecordId) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    fn engine_with(store: Arc<dyn DocumentStore>) -> RightsEngine {
        let actor = FixedActor::new(PrincipalRef::new("XWiki.Admin").unwrap());
        RightsEngine::new(store, Arc::new(actor)).unwrap()
    }

    fn page() -> ScopeReference {
        ScopeReference::Page("Main.WebHome".parse().unwrap())
    }

    #[test]
    fn missing_arguments_skip() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let engine = engine_with(store.clone());
        let rules = [SecurityRule::allow().right(Right::View).build()];

        assert_eq!(engine.save_rules(None, Some(&page())).unwrap(), SaveOutcome::Skipped);
        assert_eq!(engine.save_rules(Some(&rules[..]), None).unwrap(), SaveOutcome::Skipped);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn unknown_default_strategy_fails_construction() {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
        let config = EngineConfig::new().with_default_strategy("bogus");
        let err = RightsEngine::from_parts(
            config,
            WriterRegistry::with_defaults(),
            store,
            Arc::new(FixedActor::guest()),
        )
        .unwrap_err();
        assert!(matches!(err, RightsError::StrategyNotFound(ref name) if name == "bogus"));
    }

    #[test]
    fn with_registry_revalidates_default() {
        let engine = engine_with(Arc::new(InMemoryDocumentStore::new()));
        let err = engine.with_registry(WriterRegistry::new()).unwrap_err();
        assert!(matches!(err, RightsError::StrategyNotFound(_)));
    }

    #[test]
    fn writer_failure_prevents_save() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let engine = engine_with(store.clone());
        let rules = [SecurityRule::allow().right(Right::View).build()];

        let err = engine
            .save_rules_using(Some(&rules[..]), Some(&page()), &FailingWriter)
            .unwrap_err();
        assert!(matches!(err, RightsError::Writer(_)));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn store_failure_is_surfaced() {
        let engine = engine_with(Arc::new(BrokenStore));
        let rules = [SecurityRule::allow().right(Right::View).build()];

        let err = engine.save_rules(Some(&rules[..]), Some(&page())).unwrap_err();
        assert!(matches!(err, RightsError::Store(StoreError::Backend(_))));
    }

    #[test]
    fn outcome_helpers() {
        let saved = SaveOutcome::Saved {
            record: "Main.WebHome".parse().unwrap(),
            version: 3,
            summary: WriteSummary::default(),
        };
        assert!(saved.is_saved());
        assert_eq!(saved.version(), Some(3));
        assert_eq!(SaveOutcome::Skipped.version(), None);
    }
}
