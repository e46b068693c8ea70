//! Reducer composition ("pipe").
//!
//! A [`Pipe`] runs an outer reducer over a whole record and, for each named
//! field, an inner reducer over that field. Inner reducers always see the
//! field as it was *before* the outer reducer ran, and their results replace
//! whatever the outer reducer produced for the same key.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::mismatch;
use crate::reduce::or_initial;
use crate::{Action, BoxReducer, ReduceResult, Reducer};

/// Inner reducers keyed by the record field they own.
pub type Fields = BTreeMap<String, BoxReducer>;

pub struct Pipe<R> {
    outer: R,
    fields: Fields,
    initial: Value,
}

/// Compose `outer` with per-field `fields` over a record whose default is
/// `initial`.
pub fn pipe_reducers<R: Reducer>(outer: R, fields: Fields, initial: Map<String, Value>) -> Pipe<R> {
    Pipe {
        outer,
        fields,
        initial: Value::Object(initial),
    }
}

impl<R: Reducer> Reducer for Pipe<R> {
    fn reduce(&self, state: Option<Value>, action: &Action) -> ReduceResult {
        let state = or_initial(state, &self.initial);
        let before: Vec<Option<Value>> = match &state {
            Value::Object(record) => self
                .fields
                .keys()
                .map(|name| record.get(name).cloned())
                .collect(),
            other => return Err(mismatch("object", other)),
        };

        let mut next = match self.outer.reduce(Some(state), action)? {
            Value::Object(record) => record,
            other => return Err(mismatch("object", &other)),
        };

        for ((name, inner), field_state) in self.fields.iter().zip(before) {
            let value = inner.reduce(field_state, action)?;
            next.insert(name.clone(), value);
        }
        log::trace!(target: "compose", "'{}' piped through {} fields", action.kind, self.fields.len());
        Ok(Value::Object(next))
    }
}

impl<R> fmt::Debug for Pipe<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("initial", &self.initial)
            .finish()
    }
}
