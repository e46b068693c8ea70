#![allow(dead_code)]
//! Shared fixtures for rekit-core integration tests.

use rekit_core::{
    create_array_reducer, create_bool_reducer, create_object_reducer, create_value_reducer,
    Action, ArrayReducer, BoolReducer, BoxReducer, Fields, Handlers, Reducer, ValueReducer,
};
use serde_json::{json, Map, Value};

pub fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not a record: {}", other),
    }
}

pub fn toggle_reducer() -> BoolReducer {
    create_bool_reducer(
        false,
        [("TOGGLE", "toggle"), ("RESET", "reset")],
        &Handlers::new(),
    )
    .expect("bool reducer")
}

pub fn name_reducer() -> ValueReducer {
    create_value_reducer("redux", [("RENAME", "update"), ("RESET", "reset")], &Handlers::new())
        .expect("value reducer")
}

pub fn pets_reducer() -> ArrayReducer {
    create_array_reducer(
        vec![],
        [
            ("PUSH", "push"),
            ("POP", "pop"),
            ("FILTER", "filter"),
            ("RESET", "reset"),
        ],
        &Handlers::new(),
    )
    .expect("array reducer")
}

/// `{value: 10, bool: false}` with RESET/UPDATE on the record and a
/// toggling reducer piped over `bool`.
pub fn settings_reducer() -> BoxReducer {
    let mut fields = Fields::new();
    fields.insert("bool".into(), Box::new(toggle_reducer()));
    create_object_reducer(
        record(json!({"value": 10, "bool": false})),
        [("RESET", "reset"), ("UPDATE", "update")],
        &Handlers::new(),
        Some(fields),
    )
    .expect("object reducer")
}

/// Thread `actions` through `reducer`, starting from its initial state.
pub fn replay(reducer: &dyn Reducer, actions: &[Action]) -> Value {
    let mut state = reducer.init().expect("init");
    for action in actions {
        state = reducer.reduce(Some(state), action).expect("reduce");
    }
    state
}
