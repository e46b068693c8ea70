//! Loading reducer trees from TOML files.

mod common;

use std::io::Write;

use common::replay;
use rekit_core::{Action, Handlers, ReduceError, Reducer, ReducerConfig, ShapeKind};
use serde_json::json;

const TODOS: &str = r#"
shape = "record"

[actions]
LOAD = "update"
CLEAR = "clear"

[fields.items]
shape = "array"
actions = { ADD = "push", DONE = "updateValueAtIndex", CLEAR = "clear" }

[fields.filter]
shape = "value"
initial = "all"
actions = { SHOW = "override" }

[fields.loading]
shape = "boolean"
actions = { LOAD = "false", FETCH = "true" }
"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn load_builds_tree_from_file() {
    let file = write_config(TODOS);
    let config = ReducerConfig::load(file.path()).unwrap();
    assert_eq!(config.shape, ShapeKind::Object);
    assert_eq!(config.fields.len(), 3);

    let reducer = config.build(&Handlers::new()).unwrap();
    let state = replay(
        reducer.as_ref(),
        &[
            Action::new("FETCH"),
            Action::new("ADD").with_payload("write docs"),
            Action::new("ADD").with_payload("ship"),
            Action::new("DONE").with_index(0).with_payload("write docs (done)"),
            Action::new("SHOW").with_payload("open"),
        ],
    );
    assert_eq!(
        state,
        json!({
            "items": ["write docs (done)", "ship"],
            "filter": "open",
            "loading": true,
        })
    );
}

#[test]
fn json_actions_drive_a_loaded_tree() {
    let reducer = ReducerConfig::from_toml_str(TODOS)
        .unwrap()
        .build(&Handlers::new())
        .unwrap();
    let lines = [
        r#"{"type": "ADD", "payload": {"title": "a"}}"#,
        r#"{"type": "LOAD", "payload": {"owner": "ops"}}"#,
    ];
    let mut state = reducer.init().unwrap();
    for line in lines {
        let action = Action::from_json(serde_json::from_str(line).unwrap()).unwrap();
        state = reducer.reduce(Some(state), &action).unwrap();
    }
    assert_eq!(
        state,
        json!({
            "owner": "ops",
            "items": [{"title": "a"}],
            "filter": "all",
            "loading": false,
        })
    );
}

#[test]
fn clear_at_both_levels_empties_fields_then_reapplies_inner_results() {
    let reducer = ReducerConfig::from_toml_str(TODOS)
        .unwrap()
        .build(&Handlers::new())
        .unwrap();
    let state = json!({"items": ["x"], "filter": "open", "loading": true, "owner": "ops"});
    let state = reducer.reduce(Some(state), &Action::new("CLEAR")).unwrap();
    assert_eq!(state, json!({"items": [], "filter": "open", "loading": true}));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReducerConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ReduceError::Io(_)));
}

#[test]
fn load_reports_malformed_toml() {
    let file = write_config("shape = \"object\"\n[actions\n");
    let err = ReducerConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ReduceError::Toml(_)));
}

#[test]
fn mismatched_initial_state_fails_build() {
    let config = ReducerConfig::from_toml_str("shape = \"array\"\ninitial = 3\n").unwrap();
    let err = config.build(&Handlers::new()).err().unwrap();
    assert!(matches!(err, ReduceError::ShapeMismatch { expected: "array", found: "number" }));
}
