//! Scalar ("property") state: any JSON value replaced wholesale.

use serde_json::Value;

use super::Shape;
use crate::{Action, ReduceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueHandler {
    /// `update` / `override`
    Update,
    Reset,
}

pub struct ValueShape;

impl Shape for ValueShape {
    type Handler = ValueHandler;

    const NAME: &'static str = "value";

    fn default_initial() -> Value {
        Value::Null
    }

    fn accepts(_value: &Value) -> bool {
        true
    }

    fn handler(name: &str) -> Option<ValueHandler> {
        match name {
            "update" | "override" => Some(ValueHandler::Update),
            "reset" => Some(ValueHandler::Reset),
            _ => None,
        }
    }

    fn apply(handler: ValueHandler, state: Value, action: &Action, initial: &Value) -> ReduceResult {
        match handler {
            ValueHandler::Update => Ok(action.payload()?.resolve(&state)),
            ValueHandler::Reset => Ok(initial.clone()),
        }
    }
}
