//! Record state.
//!
//! `update` is a shallow merge: payload keys overwrite state keys one level
//! deep, and a payload value of `null` overwrites too (the key stays, holding
//! `null`). Nested records are replaced, not merged.

use serde_json::{Map, Value};

use super::Shape;
use crate::error::mismatch;
use crate::{Action, ReduceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectHandler {
    /// `update` / `override`
    Update,
    Clear,
    Reset,
}

pub struct ObjectShape;

impl Shape for ObjectShape {
    type Handler = ObjectHandler;

    const NAME: &'static str = "object";

    fn default_initial() -> Value {
        Value::Object(Map::new())
    }

    fn accepts(value: &Value) -> bool {
        value.is_object()
    }

    fn handler(name: &str) -> Option<ObjectHandler> {
        match name {
            "update" | "override" => Some(ObjectHandler::Update),
            "clear" => Some(ObjectHandler::Clear),
            "reset" => Some(ObjectHandler::Reset),
            _ => None,
        }
    }

    fn apply(handler: ObjectHandler, state: Value, action: &Action, initial: &Value) -> ReduceResult {
        match handler {
            ObjectHandler::Update => {
                let patch = match action.payload_value()? {
                    Value::Object(patch) => patch,
                    _ => return Err(action.invalid("an object")),
                };
                match state {
                    Value::Object(fields) => Ok(Value::Object(merge(fields, patch))),
                    other => Err(mismatch(Self::NAME, &other)),
                }
            }
            ObjectHandler::Clear => Ok(Value::Object(Map::new())),
            ObjectHandler::Reset => Ok(initial.clone()),
        }
    }
}

/// Shallow merge of `patch` over `fields`; `patch` wins on every key.
fn merge(mut fields: Map<String, Value>, patch: &Map<String, Value>) -> Map<String, Value> {
    for (key, value) in patch {
        fields.insert(key.clone(), value.clone());
    }
    fields
}
