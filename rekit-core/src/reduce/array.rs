//! Sequence state.

use serde_json::Value;

use super::Shape;
use crate::error::mismatch;
use crate::{Action, ReduceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayHandler {
    Push,
    Pop,
    Concat,
    Clear,
    Filter,
    Map,
    /// `updateIndex` / `updateValueAtIndex`
    UpdateIndex,
    Reset,
}

pub struct ArrayShape;

impl Shape for ArrayShape {
    type Handler = ArrayHandler;

    const NAME: &'static str = "array";

    fn default_initial() -> Value {
        Value::Array(Vec::new())
    }

    fn accepts(value: &Value) -> bool {
        value.is_array()
    }

    fn handler(name: &str) -> Option<ArrayHandler> {
        match name {
            "push" => Some(ArrayHandler::Push),
            "pop" => Some(ArrayHandler::Pop),
            "concat" => Some(ArrayHandler::Concat),
            "clear" => Some(ArrayHandler::Clear),
            "filter" => Some(ArrayHandler::Filter),
            "map" => Some(ArrayHandler::Map),
            "updateIndex" | "updateValueAtIndex" => Some(ArrayHandler::UpdateIndex),
            "reset" => Some(ArrayHandler::Reset),
            _ => None,
        }
    }

    fn apply(handler: ArrayHandler, state: Value, action: &Action, initial: &Value) -> ReduceResult {
        match handler {
            ArrayHandler::Push => edit(state, |items| {
                items.push(action.payload_value()?.clone());
                Ok(())
            }),
            // Popping an empty sequence leaves it empty.
            ArrayHandler::Pop => edit(state, |items| {
                items.pop();
                Ok(())
            }),
            ArrayHandler::Concat => edit(state, |items| match action.payload_value()? {
                Value::Array(more) => {
                    items.extend(more.iter().cloned());
                    Ok(())
                }
                _ => Err(action.invalid("an array")),
            }),
            ArrayHandler::Clear => Ok(Value::Array(Vec::new())),
            ArrayHandler::Filter => edit(state, |items| {
                let keep = action.filter_fn()?;
                let mut index = 0;
                items.retain(|el| {
                    let kept = keep(el, index);
                    index += 1;
                    kept
                });
                Ok(())
            }),
            ArrayHandler::Map => edit(state, |items| {
                let f = action.map_fn()?;
                for (index, el) in items.iter_mut().enumerate() {
                    *el = f(el, index);
                }
                Ok(())
            }),
            // Out-of-range indices leave the sequence as it is.
            ArrayHandler::UpdateIndex => edit(state, |items| {
                let index = action.index()?;
                let payload = action.payload()?;
                if let Some(slot) = items.get_mut(index) {
                    *slot = payload.resolve(slot);
                }
                Ok(())
            }),
            ArrayHandler::Reset => Ok(initial.clone()),
        }
    }
}

fn edit(state: Value, f: impl FnOnce(&mut Vec<Value>) -> ReduceResult<()>) -> ReduceResult {
    match state {
        Value::Array(mut items) => {
            f(&mut items)?;
            Ok(Value::Array(items))
        }
        other => Err(mismatch(ArrayShape::NAME, &other)),
    }
}
