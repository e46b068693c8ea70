//! # rekit-core
//!
//! Reducer factories for unidirectional-data-flow state containers.
//!
//! A reducer is a pure `(state, action) -> state` function. This crate builds
//! them from an initial state and an `action type -> handler name` map, for
//! four state shapes (boolean, scalar value, array, object), and composes an
//! object reducer with per-field inner reducers ([`pipe_reducers`]).
//!
//! ```
//! use rekit_core::{create_array_reducer, Action, Handlers, Reducer};
//! use serde_json::json;
//!
//! let pets = create_array_reducer(vec![], [("PUSH", "push")], &Handlers::new()).unwrap();
//! let state = pets.reduce(Some(json!(["dog"])), &Action::new("PUSH").with_payload("cat")).unwrap();
//! assert_eq!(state, json!(["dog", "cat"]));
//! ```
//!
//! State is carried as [`serde_json::Value`]; reducer trees can also be
//! declared in TOML (see [`config`]).

pub mod action;
mod compose;
pub mod config;
mod dispatch;
mod error;
pub mod reduce;

pub use action::{Action, FilterFn, MapFn, Payload, UpdateFn, INIT_ACTION};
pub use compose::{pipe_reducers, Fields, Pipe};
pub use config::{ReducerConfig, ShapeKind};
pub use dispatch::{from_fn, BoxReducer, FnReducer, Reducer};
pub use error::{ReduceError, ReduceResult};
pub use reduce::{
    create_array_reducer, create_bool_reducer, create_object_reducer, create_value_reducer,
    ArrayReducer, BoolReducer, CustomHandler, Handlers, ObjectReducer, ShapeReducer, ValueReducer,
};
