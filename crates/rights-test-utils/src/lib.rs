//! Testing utilities for the rights workspace
//!
//! Shared fixtures for building rules, scopes and engines.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use rights_core::{EngineConfig, FixedActor, InMemoryDocumentStore, RightsEngine};
use rights_model::{
    ClassId, PrincipalRef, RecordId, Right, RuleState, ScopeReference, SecurityRule, ZonePath,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub const ADMIN: &str = "XWiki.Admin";

/// Empty rule list
pub const NO_RULES: &[SecurityRule] = &[];

pub fn principal(id: &str) -> PrincipalRef {
    PrincipalRef::new(id).unwrap()
}

pub fn page(id: &str) -> RecordId {
    id.parse().unwrap()
}

pub fn zone(path: &str) -> ZonePath {
    path.parse().unwrap()
}

pub fn page_scope(id: &str) -> ScopeReference {
    ScopeReference::Page(page(id))
}

pub fn zone_scope(path: &str) -> ScopeReference {
    ScopeReference::Zone(zone(path))
}

pub fn page_rights_class() -> ClassId {
    ClassId::new("XWiki.XWikiRights")
}

pub fn global_rights_class() -> ClassId {
    ClassId::new("XWiki.XWikiGlobalRights")
}

/// Rule granting or denying one right to one user
pub fn user_rule(user: &str, right: Right, state: RuleState) -> SecurityRule {
    SecurityRule::new([principal(user)], Vec::new(), [right], state)
}

/// Rule granting one right to one group
pub fn group_allow(group: &str, right: Right) -> SecurityRule {
    SecurityRule::new(Vec::new(), [principal(group)], [right], RuleState::Allow)
}

/// `count` distinct allow rules, one per user `XWiki.User{i}`
pub fn numbered_rules(count: usize) -> Vec<SecurityRule> {
    (0..count)
        .map(|i| user_rule(&format!("XWiki.User{i}"), Right::View, RuleState::Allow))
        .collect()
}

/// Route engine logs to the test harness; honours `RUST_LOG`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Engine over a fresh in-memory store, acting as [`ADMIN`]
pub fn setup_engine() -> (RightsEngine, Arc<InMemoryDocumentStore>) {
    setup_engine_with(EngineConfig::default())
}

pub fn setup_engine_with(config: EngineConfig) -> (RightsEngine, Arc<InMemoryDocumentStore>) {
    init_tracing();
    let store = Arc::new(InMemoryDocumentStore::new());
    let actor = Arc::new(FixedActor::new(principal(ADMIN)));
    let engine = RightsEngine::new(store.clone(), actor)
        .and_then(|engine| engine.with_config(config))
        .unwrap();
    (engine, store)
}
