//! Error type shared by reducer construction, dispatch and configuration.

use std::fmt;

use serde_json::Value;

/// Result type for reducer operations. Defaults to a next-state value.
pub type ReduceResult<T = Value> = Result<T, ReduceError>;

/// Error from building or running a reducer.
#[derive(Debug)]
pub enum ReduceError {
    /// An action type is mapped to a handler name that neither the builtin
    /// vocabulary of the shape nor the custom handler set knows.
    UnresolvedHandler {
        shape: &'static str,
        action_type: String,
        handler: String,
    },
    /// The selected handler needs a field the action does not carry.
    MissingField {
        action_type: String,
        field: &'static str,
    },
    /// The action carries the field, but of the wrong kind.
    InvalidPayload {
        action_type: String,
        expected: &'static str,
    },
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A JSON action record could not be decoded.
    InvalidAction(String),
    Config(String),
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl fmt::Display for ReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReduceError::UnresolvedHandler {
                shape,
                action_type,
                handler,
            } => write!(
                f,
                "action type '{}' maps to unknown {} handler '{}'",
                action_type, shape, handler
            ),
            ReduceError::MissingField { action_type, field } => {
                write!(f, "action '{}' is missing required field '{}'", action_type, field)
            }
            ReduceError::InvalidPayload {
                action_type,
                expected,
            } => write!(f, "action '{}' expects {} payload", action_type, expected),
            ReduceError::ShapeMismatch { expected, found } => {
                write!(f, "expected {} state, found {}", expected, found)
            }
            ReduceError::InvalidAction(msg) => write!(f, "invalid action: {}", msg),
            ReduceError::Config(msg) => write!(f, "invalid reducer config: {}", msg),
            ReduceError::Io(e) => write!(f, "{}", e),
            ReduceError::Toml(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ReduceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReduceError::Io(e) => Some(e),
            ReduceError::Toml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReduceError {
    fn from(e: std::io::Error) -> Self {
        ReduceError::Io(e)
    }
}

impl From<toml::de::Error> for ReduceError {
    fn from(e: toml::de::Error) -> Self {
        ReduceError::Toml(e)
    }
}

/// Short name of a JSON value's kind, for shape errors.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Shape error for `found` when a reducer expected `expected`.
pub(crate) fn mismatch(expected: &'static str, found: &Value) -> ReduceError {
    ReduceError::ShapeMismatch {
        expected,
        found: kind_of(found),
    }
}
