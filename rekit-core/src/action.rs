//! Action records that flow into reducers.
//!
//! An action is discriminated by its `kind` (the `type` field of a JSON
//! action record). The remaining fields are only read by the handlers that
//! need them: `payload` by update/push/concat, `index` by index updates,
//! `filter` and `map` by the sequence handlers of the same name.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ReduceError, ReduceResult};

/// Unary transform applied to a current value.
pub type UpdateFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;
/// Element predicate, called with `(element, index)`.
pub type FilterFn = Arc<dyn Fn(&Value, usize) -> bool + Send + Sync>;
/// Element mapper, called with `(element, index)`.
pub type MapFn = Arc<dyn Fn(&Value, usize) -> Value + Send + Sync>;

/// Type of the action a reducer receives from [`crate::Reducer::init`].
pub const INIT_ACTION: &str = "@@rekit/INIT";

// ============================================================================
// Payload
// ============================================================================

/// Either a literal value or a function of the current value.
#[derive(Clone)]
pub enum Payload {
    Value(Value),
    Apply(UpdateFn),
}

impl Payload {
    /// Literals replace `current`; functions are applied to it.
    pub fn resolve(&self, current: &Value) -> Value {
        match self {
            Payload::Value(v) => v.clone(),
            Payload::Apply(f) => f(current),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Payload::Value(v) => Some(v),
            Payload::Apply(_) => None,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Payload::Apply(_) => f.write_str("Apply(<fn>)"),
        }
    }
}

impl From<Value> for Payload {
    fn from(v: Value) -> Self {
        Payload::Value(v)
    }
}

// ============================================================================
// Action
// ============================================================================

#[derive(Clone, Default)]
pub struct Action {
    pub kind: String,
    pub payload: Option<Payload>,
    pub index: Option<usize>,
    pub filter: Option<FilterFn>,
    pub map: Option<MapFn>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// The action every reducer is first called with by [`crate::Reducer::init`].
    pub fn init() -> Self {
        Self::new(INIT_ACTION)
    }

    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(Payload::Value(payload.into()));
        self
    }

    /// Use a function of the current value as the payload.
    pub fn with_update(mut self, f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        self.payload = Some(Payload::Apply(Arc::new(f)));
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_filter(mut self, f: impl Fn(&Value, usize) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(f));
        self
    }

    pub fn with_map(mut self, f: impl Fn(&Value, usize) -> Value + Send + Sync + 'static) -> Self {
        self.map = Some(Arc::new(f));
        self
    }

    pub fn payload(&self) -> ReduceResult<&Payload> {
        self.payload.as_ref().ok_or_else(|| self.missing("payload"))
    }

    /// The payload, which must be a literal rather than a function.
    pub fn payload_value(&self) -> ReduceResult<&Value> {
        self.payload()?
            .as_value()
            .ok_or_else(|| self.invalid("a literal"))
    }

    pub fn index(&self) -> ReduceResult<usize> {
        self.index.ok_or_else(|| self.missing("index"))
    }

    pub fn filter_fn(&self) -> ReduceResult<&FilterFn> {
        self.filter.as_ref().ok_or_else(|| self.missing("filter"))
    }

    pub fn map_fn(&self) -> ReduceResult<&MapFn> {
        self.map.as_ref().ok_or_else(|| self.missing("map"))
    }

    pub(crate) fn missing(&self, field: &'static str) -> ReduceError {
        ReduceError::MissingField {
            action_type: self.kind.clone(),
            field,
        }
    }

    pub(crate) fn invalid(&self, expected: &'static str) -> ReduceError {
        ReduceError::InvalidPayload {
            action_type: self.kind.clone(),
            expected,
        }
    }

    /// Decode a JSON action record such as
    /// `{"type": "PUSH", "payload": "cat"}`.
    ///
    /// Only data fields travel over JSON; `filter` and `map` functions must be
    /// attached with [`Action::with_filter`] and [`Action::with_map`].
    pub fn from_json(value: Value) -> ReduceResult<Self> {
        let record: ActionRecord =
            serde_json::from_value(value).map_err(|e| ReduceError::InvalidAction(e.to_string()))?;
        Ok(Self {
            kind: record.kind,
            payload: record.payload.map(Payload::Value),
            index: record.index,
            ..Default::default()
        })
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("kind", &self.kind)
            .field("payload", &self.payload)
            .field("index", &self.index)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("map", &self.map.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[derive(Deserialize)]
struct ActionRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, deserialize_with = "present")]
    payload: Option<Value>,
    #[serde(default)]
    index: Option<usize>,
}

/// `"payload": null` is a literal `null`, not an absent payload.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}
