//! Shape-specific reducer factories.
//!
//! Every factory produces a [`ShapeReducer`]: an action-type map resolved
//! once, at construction, into routes to either a builtin handler of the
//! shape or a custom handler. Custom handlers win over builtins of the same
//! name. Dispatch is a single map lookup followed by a `match`:
//! - unmapped action types pass the state through untouched
//! - an absent (or `null`) state is replaced by the initial state first
//!
//! Handler names that resolve to nothing are rejected when the reducer is
//! built, so dispatch itself never fails on configuration.

mod array;
mod boolean;
mod object;
mod value;

pub use array::{ArrayHandler, ArrayShape};
pub use boolean::{BoolHandler, BoolShape};
pub use object::{ObjectHandler, ObjectShape};
pub use value::{ValueHandler, ValueShape};

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::compose::{pipe_reducers, Fields};
use crate::error::mismatch;
use crate::{Action, BoxReducer, ReduceError, ReduceResult, Reducer};

/// One of the four state shapes, with its closed handler vocabulary.
pub trait Shape: Send + Sync + 'static {
    type Handler: Copy + fmt::Debug + Send + Sync;

    /// Name used in errors and logs.
    const NAME: &'static str;

    fn default_initial() -> Value;

    fn accepts(value: &Value) -> bool;

    /// Resolve a builtin handler name.
    fn handler(name: &str) -> Option<Self::Handler>;

    fn apply(handler: Self::Handler, state: Value, action: &Action, initial: &Value) -> ReduceResult;
}

/// Caller-supplied handler, `(state, action) -> state`.
pub type CustomHandler = Arc<dyn Fn(Value, &Action) -> ReduceResult + Send + Sync>;

/// Named custom handlers merged over a shape's builtins.
#[derive(Clone, Default)]
pub struct Handlers {
    map: HashMap<String, CustomHandler>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        name: impl Into<String>,
        f: impl Fn(Value, &Action) -> ReduceResult + Send + Sync + 'static,
    ) -> Self {
        self.insert(name, f);
        self
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(Value, &Action) -> ReduceResult + Send + Sync + 'static,
    ) {
        self.map.insert(name.into(), Arc::new(f));
    }

    pub fn get(&self, name: &str) -> Option<&CustomHandler> {
        self.map.get(name)
    }

}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

enum Route<H> {
    Builtin(H),
    Custom(CustomHandler),
}

/// Reducer over one state shape, driven by an action-type map.
pub struct ShapeReducer<S: Shape> {
    initial: Value,
    routes: HashMap<String, Route<S::Handler>>,
    _shape: PhantomData<S>,
}

pub type BoolReducer = ShapeReducer<BoolShape>;
pub type ValueReducer = ShapeReducer<ValueShape>;
pub type ArrayReducer = ShapeReducer<ArrayShape>;
pub type ObjectReducer = ShapeReducer<ObjectShape>;

impl<S: Shape> ShapeReducer<S> {
    /// Build a reducer from its initial state, an `action type -> handler
    /// name` map and the custom handlers to merge over the builtins.
    pub fn new<K, V>(
        initial: Value,
        action_types: impl IntoIterator<Item = (K, V)>,
        custom: &Handlers,
    ) -> ReduceResult<Self>
    where
        K: Into<String>,
        V: AsRef<str>,
    {
        if !S::accepts(&initial) {
            return Err(mismatch(S::NAME, &initial));
        }

        let mut routes = HashMap::new();
        for (action_type, handler) in action_types {
            let action_type = action_type.into();
            let handler = handler.as_ref();
            let route = if let Some(f) = custom.get(handler) {
                Route::Custom(Arc::clone(f))
            } else if let Some(h) = S::handler(handler) {
                Route::Builtin(h)
            } else {
                return Err(ReduceError::UnresolvedHandler {
                    shape: S::NAME,
                    action_type,
                    handler: handler.to_string(),
                });
            };
            routes.insert(action_type, route);
        }

        Ok(Self {
            initial,
            routes,
            _shape: PhantomData,
        })
    }

    pub fn initial_state(&self) -> &Value {
        &self.initial
    }

    /// Whether `action_type` is mapped to a handler.
    pub fn handles(&self, action_type: &str) -> bool {
        self.routes.contains_key(action_type)
    }
}

impl<S: Shape> Reducer for ShapeReducer<S> {
    fn reduce(&self, state: Option<Value>, action: &Action) -> ReduceResult {
        let state = or_initial(state, &self.initial);
        match self.routes.get(&action.kind) {
            None => Ok(state),
            Some(Route::Builtin(h)) => {
                log::trace!(target: "reduce", "{} '{}' -> {:?}", S::NAME, action.kind, h);
                S::apply(*h, state, action, &self.initial)
            }
            Some(Route::Custom(f)) => {
                log::trace!(target: "reduce", "{} '{}' -> custom handler", S::NAME, action.kind);
                f(state, action)
            }
        }
    }
}

impl<S: Shape> fmt::Debug for ShapeReducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut action_types: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        action_types.sort_unstable();
        f.debug_struct("ShapeReducer")
            .field("shape", &S::NAME)
            .field("initial", &self.initial)
            .field("action_types", &action_types)
            .finish()
    }
}

/// Absent and `null` states both stand for "not yet initialised".
pub(crate) fn or_initial(state: Option<Value>, initial: &Value) -> Value {
    match state {
        None | Some(Value::Null) => initial.clone(),
        Some(state) => state,
    }
}

// ============================================================================
// Factories
// ============================================================================

pub fn create_bool_reducer<K, V>(
    initial: bool,
    action_types: impl IntoIterator<Item = (K, V)>,
    custom: &Handlers,
) -> ReduceResult<BoolReducer>
where
    K: Into<String>,
    V: AsRef<str>,
{
    BoolReducer::new(Value::Bool(initial), action_types, custom)
}

pub fn create_value_reducer<K, V>(
    initial: impl Into<Value>,
    action_types: impl IntoIterator<Item = (K, V)>,
    custom: &Handlers,
) -> ReduceResult<ValueReducer>
where
    K: Into<String>,
    V: AsRef<str>,
{
    ValueReducer::new(initial.into(), action_types, custom)
}

pub fn create_array_reducer<K, V>(
    initial: Vec<Value>,
    action_types: impl IntoIterator<Item = (K, V)>,
    custom: &Handlers,
) -> ReduceResult<ArrayReducer>
where
    K: Into<String>,
    V: AsRef<str>,
{
    ArrayReducer::new(Value::Array(initial), action_types, custom)
}

/// Object reducer; when `fields` is given, the result is piped through
/// those inner reducers (see [`pipe_reducers`]).
pub fn create_object_reducer<K, V>(
    initial: Map<String, Value>,
    action_types: impl IntoIterator<Item = (K, V)>,
    custom: &Handlers,
    fields: Option<Fields>,
) -> ReduceResult<BoxReducer>
where
    K: Into<String>,
    V: AsRef<str>,
{
    let source = ObjectReducer::new(Value::Object(initial.clone()), action_types, custom)?;
    let reducer: BoxReducer = match fields {
        Some(fields) => Box::new(pipe_reducers(source, fields, initial)),
        None => Box::new(source),
    };
    Ok(reducer)
}
