use serde_json::Value;

use super::Shape;
use crate::error::mismatch;
use crate::{Action, ReduceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolHandler {
    True,
    False,
    Toggle,
    Reset,
}

pub struct BoolShape;

impl Shape for BoolShape {
    type Handler = BoolHandler;

    const NAME: &'static str = "boolean";

    fn default_initial() -> Value {
        Value::Bool(false)
    }

    fn accepts(value: &Value) -> bool {
        value.is_boolean()
    }

    fn handler(name: &str) -> Option<BoolHandler> {
        match name {
            "true" => Some(BoolHandler::True),
            "false" => Some(BoolHandler::False),
            "toggle" => Some(BoolHandler::Toggle),
            "reset" => Some(BoolHandler::Reset),
            _ => None,
        }
    }

    fn apply(handler: BoolHandler, state: Value, _action: &Action, initial: &Value) -> ReduceResult {
        match handler {
            BoolHandler::True => Ok(Value::Bool(true)),
            BoolHandler::False => Ok(Value::Bool(false)),
            BoolHandler::Toggle => match state {
                Value::Bool(b) => Ok(Value::Bool(!b)),
                other => Err(mismatch(Self::NAME, &other)),
            },
            BoolHandler::Reset => Ok(initial.clone()),
        }
    }
}
