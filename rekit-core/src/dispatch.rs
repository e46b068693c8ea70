//! The reducer abstraction shared by shape reducers and composers.

use std::sync::Arc;

use serde_json::Value;

use crate::{Action, ReduceResult};

/// Trait for pure state transitions.
///
/// `state` is `None` on the first call; implementations substitute their
/// initial state. The previous state is taken by value, so the caller never
/// observes a value it still holds being changed.
pub trait Reducer: Send + Sync {
    fn reduce(&self, state: Option<Value>, action: &Action) -> ReduceResult;

    /// Initial state, as produced by the first dispatch of a state container.
    fn init(&self) -> ReduceResult {
        self.reduce(None, &Action::init())
    }
}

pub type BoxReducer = Box<dyn Reducer>;

impl<R: Reducer + ?Sized> Reducer for Box<R> {
    fn reduce(&self, state: Option<Value>, action: &Action) -> ReduceResult {
        (**self).reduce(state, action)
    }
}

impl<R: Reducer + ?Sized> Reducer for Arc<R> {
    fn reduce(&self, state: Option<Value>, action: &Action) -> ReduceResult {
        (**self).reduce(state, action)
    }
}

/// Adapter turning a closure into a [`Reducer`].
pub struct FnReducer<F>(F);

impl<F> Reducer for FnReducer<F>
where
    F: Fn(Option<Value>, &Action) -> ReduceResult + Send + Sync,
{
    fn reduce(&self, state: Option<Value>, action: &Action) -> ReduceResult {
        (self.0)(state, action)
    }
}

/// Wrap a hand-written `(state, action) -> state` function.
pub fn from_fn<F>(f: F) -> FnReducer<F>
where
    F: Fn(Option<Value>, &Action) -> ReduceResult + Send + Sync,
{
    FnReducer(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn counter() -> impl Reducer {
        from_fn(|state, action| {
            let n = state.and_then(|s| s.as_i64()).unwrap_or(0);
            Ok(match action.kind.as_str() {
                "INC" => json!(n + 1),
                _ => json!(n),
            })
        })
    }

    #[test]
    fn init_dispatches_absent_state() {
        assert_eq!(counter().init().unwrap(), json!(0));
    }

    #[test]
    fn boxed_reducers_forward() {
        let boxed: BoxReducer = Box::new(counter());
        assert_eq!(boxed.reduce(Some(json!(2)), &Action::new("INC")).unwrap(), json!(3));
        let shared: Arc<dyn Reducer> = Arc::new(counter());
        assert_eq!(shared.reduce(Some(json!(5)), &Action::new("INC")).unwrap(), json!(6));
    }
}
