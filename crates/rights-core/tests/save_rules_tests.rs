//! Engine save tests
//!
//! End-to-end behaviour of `RightsEngine::save_rules*` over the in-memory store.

use pretty_assertions::assert_eq;
use rights_core::prelude::*;
use rights_core::{DocumentStore, UNSUPPORTED_SCOPE_MESSAGE};
use rights_model::{ClassId, ObjectRef, Record};
use rights_test_utils::*;
use std::sync::Arc;

#[test]
fn test_empty_rules_on_missing_page_do_not_save() {
    let (engine, store) = setup_engine();

    let outcome = engine
        .save_rules(Some(NO_RULES), Some(&page_scope("Sandbox.Missing")))
        .unwrap();

    assert_eq!(
        outcome,
        SaveOutcome::NotPersisted {
            record: page("Sandbox.Missing")
        }
    );
    assert_eq!(store.save_count(), 0);
    assert!(!store.exists(&page("Sandbox.Missing")).unwrap());
}

#[test]
fn test_fresh_page_gets_one_object_per_rule() {
    let (engine, store) = setup_engine();
    let rules = numbered_rules(4);

    let outcome = engine
        .save_rules(Some(rules.as_slice()), Some(&page_scope("Sandbox.TestPage")))
        .unwrap();
    assert_eq!(outcome.version(), Some(1));

    let saved = store.get(&page("Sandbox.TestPage")).unwrap();
    assert_eq!(saved.object_numbers(&page_rights_class()), vec![0, 1, 2, 3]);
    assert_eq!(saved.rules(&page_rights_class()).unwrap(), rules);
    assert_eq!(saved.total_object_count(), 4);
    assert!(!saved.is_hidden());
    assert!(!saved.is_new());
}

#[test]
fn test_object_fields_use_stored_encoding() {
    let (engine, store) = setup_engine();
    let rule = SecurityRule::deny()
        .user(principal("XWiki.Bob"))
        .user(principal("XWiki.Alice"))
        .rights([Right::Edit, Right::View])
        .build();

    engine
        .save_rules(Some(&[rule][..]), Some(&page_scope("Sandbox.TestPage")))
        .unwrap();

    let saved = store.get(&page("Sandbox.TestPage")).unwrap();
    let object = saved.object(&page_rights_class(), 0).unwrap();
    assert_eq!(object.fields()["users"], "XWiki.Alice,XWiki.Bob");
    assert_eq!(object.fields()["groups"], "");
    assert_eq!(object.fields()["levels"], "view,edit");
    assert_eq!(object.fields()["allow"], "0");
}

#[test]
fn test_saving_twice_is_idempotent() {
    let (engine, store) = setup_engine();
    let scope = page_scope("Sandbox.TestPage");
    let rules = numbered_rules(3);

    engine.save_rules(Some(rules.as_slice()), Some(&scope)).unwrap();
    let first = store.get(&page("Sandbox.TestPage")).unwrap();

    let outcome = engine.save_rules(Some(rules.as_slice()), Some(&scope)).unwrap();
    let second = store.get(&page("Sandbox.TestPage")).unwrap();

    match outcome {
        SaveOutcome::Saved { version, summary, .. } => {
            assert_eq!(version, 2);
            assert!(summary.is_noop());
            assert_eq!(summary.unchanged, 3);
        }
        other => panic!("expected save, got {other:?}"),
    }
    assert_eq!(
        first.objects(&page_rights_class()).collect::<Vec<_>>(),
        second.objects(&page_rights_class()).collect::<Vec<_>>()
    );
}

#[test]
fn test_recycling_overwrites_low_slots_and_drops_the_rest() {
    let (engine, store) = setup_engine();
    let scope = page_scope("Sandbox.TestPage");
    engine.save_rules(Some(numbered_rules(3).as_slice()), Some(&scope)).unwrap();

    let replacement = vec![
        group_allow("XWiki.XWikiAdminGroup", Right::Admin),
        user_rule("XWiki.Guest", Right::Edit, RuleState::Deny),
    ];
    let outcome = engine.save_rules(Some(replacement.as_slice()), Some(&scope)).unwrap();

    let SaveOutcome::Saved { summary, .. } = outcome else {
        panic!("expected save");
    };
    assert_eq!(summary.updated, 2);
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.created, 0);

    let saved = store.get(&page("Sandbox.TestPage")).unwrap();
    assert_eq!(saved.object_numbers(&page_rights_class()), vec![0, 1]);
    assert_eq!(saved.rules(&page_rights_class()).unwrap(), replacement);
}

#[test]
fn test_replace_strategy_hands_out_fresh_numbers() {
    let (engine, store) = setup_engine();
    let scope = page_scope("Sandbox.TestPage");
    engine.save_rules(Some(numbered_rules(3).as_slice()), Some(&scope)).unwrap();

    engine
        .save_rules_with(Some(numbered_rules(2).as_slice()), Some(&scope), "replace")
        .unwrap();

    let saved = store.get(&page("Sandbox.TestPage")).unwrap();
    assert_eq!(saved.object_numbers(&page_rights_class()), vec![3, 4]);
    assert_eq!(saved.rules(&page_rights_class()).unwrap(), numbered_rules(2));
}

#[test]
fn test_unknown_strategy_is_reported_without_saving() {
    let (engine, store) = setup_engine();

    let err = engine
        .save_rules_with(
            Some(numbered_rules(1).as_slice()),
            Some(&page_scope("Sandbox.TestPage")),
            "bogus",
        )
        .unwrap_err();

    assert!(matches!(err, RightsError::StrategyNotFound(ref name) if name == "bogus"));
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_object_scope_is_unsupported() {
    let (engine, store) = setup_engine();
    let scope = ScopeReference::Object(ObjectRef {
        page: page("Sandbox.TestPage"),
        class: ClassId::new("XWiki.XWikiComments"),
        number: 0,
    });

    let err = engine
        .save_rules(Some(numbered_rules(1).as_slice()), Some(&scope))
        .unwrap_err();

    assert!(matches!(err, RightsError::UnsupportedScope { kind: "object" }));
    assert_eq!(err.to_string(), UNSUPPORTED_SCOPE_MESSAGE);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_attachment_scope_is_unsupported() {
    let (engine, _store) = setup_engine();
    let scope = ScopeReference::Attachment {
        page: page("Sandbox.TestPage"),
        name: "image.png".into(),
    };

    let err = engine
        .save_rules(Some(numbered_rules(1).as_slice()), Some(&scope))
        .unwrap_err();
    assert_eq!(err.to_string(), "Could not set rights for the given reference.");
}

#[test]
fn test_first_zone_save_creates_hidden_preferences() {
    let (engine, store) = setup_engine();
    let rules = vec![group_allow("XWiki.XWikiAllGroup", Right::Edit)];

    let outcome = engine
        .save_rules(Some(rules.as_slice()), Some(&zone_scope("Sandbox")))
        .unwrap();

    let prefs = page("Sandbox.WebPreferences");
    assert!(matches!(outcome, SaveOutcome::Saved { ref record, .. } if *record == prefs));
    let saved = store.get(&prefs).unwrap();
    assert!(saved.is_hidden());
    assert_eq!(saved.object_numbers(&global_rights_class()), vec![0]);
    assert_eq!(saved.object_count(&page_rights_class()), 0);
}

#[test]
fn test_later_zone_saves_leave_hidden_alone() {
    let (engine, store) = setup_engine();
    let scope = zone_scope("Sandbox");
    let prefs = page("Sandbox.WebPreferences");
    engine.save_rules(Some(numbered_rules(1).as_slice()), Some(&scope)).unwrap();

    // Someone unhides the preferences record.
    let mut visible = Record::clone(&store.load(&prefs).unwrap());
    visible.set_hidden(false);
    store.save(visible).unwrap();

    engine.save_rules(Some(numbered_rules(2).as_slice()), Some(&scope)).unwrap();
    assert!(!store.get(&prefs).unwrap().is_hidden());
}

#[test]
fn test_global_scope_uses_installation_preferences() {
    let (engine, store) = setup_engine();

    engine
        .save_rules(Some(numbered_rules(2).as_slice()), Some(&ScopeReference::Global))
        .unwrap();

    let saved = store.get(&page("XWiki.XWikiPreferences")).unwrap();
    assert!(saved.is_hidden());
    assert_eq!(saved.object_numbers(&global_rights_class()), vec![0, 1]);
}

#[test]
fn test_empty_rules_on_existing_preferences_persist_without_hiding() {
    let (engine, store) = setup_engine();
    let prefs = page("Sandbox.WebPreferences");
    store.save(Record::new(prefs.clone())).unwrap();

    let outcome = engine
        .save_rules(Some(NO_RULES), Some(&zone_scope("Sandbox")))
        .unwrap();

    assert_eq!(outcome.version(), Some(2));
    let saved = store.get(&prefs).unwrap();
    assert!(!saved.is_hidden());
    assert_eq!(saved.total_object_count(), 0);
}

#[test]
fn test_empty_rules_clear_existing_page() {
    let (engine, store) = setup_engine();
    let scope = page_scope("Sandbox.TestPage");
    engine.save_rules(Some(numbered_rules(2).as_slice()), Some(&scope)).unwrap();

    let outcome = engine.save_rules(Some(NO_RULES), Some(&scope)).unwrap();

    assert!(outcome.is_saved());
    let saved = store.get(&page("Sandbox.TestPage")).unwrap();
    assert_eq!(saved.object_count(&page_rights_class()), 0);
    // Numbers are never reused.
    assert_eq!(saved.next_number(&page_rights_class()), 2);
}

#[test]
fn test_author_is_the_acting_principal() {
    let (engine, store) = setup_engine();
    engine
        .save_rules(Some(numbered_rules(1).as_slice()), Some(&page_scope("Sandbox.TestPage")))
        .unwrap();

    let saved = store.get(&page("Sandbox.TestPage")).unwrap();
    assert_eq!(saved.author(), Some(&principal(ADMIN)));
}

#[test]
fn test_guest_actor_clears_author() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let admin_actor = Arc::new(FixedActor::new(principal(ADMIN)));
    let admin = RightsEngine::new(store.clone(), admin_actor).unwrap();
    let guest = RightsEngine::new(store.clone(), Arc::new(FixedActor::guest())).unwrap();
    let scope = page_scope("Sandbox.TestPage");

    admin.save_rules(Some(numbered_rules(1).as_slice()), Some(&scope)).unwrap();
    guest.save_rules(Some(numbered_rules(1).as_slice()), Some(&scope)).unwrap();

    assert_eq!(store.get(&page("Sandbox.TestPage")).unwrap().author(), None);
}

#[test]
fn test_other_classes_on_the_page_survive() {
    let (engine, store) = setup_engine();
    let id = page("Sandbox.TestPage");
    let comments = ClassId::new("XWiki.XWikiComments");
    let mut existing = Record::new(id.clone());
    existing.add_object(&comments, &group_allow("XWiki.XWikiAllGroup", Right::Comment));
    store.save(existing).unwrap();

    engine
        .save_rules(Some(numbered_rules(2).as_slice()), Some(&page_scope("Sandbox.TestPage")))
        .unwrap();

    let saved = store.get(&id).unwrap();
    assert_eq!(saved.object_count(&comments), 1);
    assert_eq!(saved.object_count(&page_rights_class()), 2);
}

#[test]
fn test_custom_configuration_changes_targets() {
    let config = EngineConfig::from_toml_str(
        r#"
        zone_preferences_name = "ZonePreferences"
        global_rights_class = "Rights.Global"
        "#,
    )
    .unwrap();
    let (engine, store) = setup_engine_with(config);

    engine
        .save_rules(Some(numbered_rules(1).as_slice()), Some(&zone_scope("Sandbox")))
        .unwrap();

    let saved = store.get(&page("Sandbox.ZonePreferences")).unwrap();
    assert_eq!(saved.object_numbers(&ClassId::new("Rights.Global")), vec![0]);
}
