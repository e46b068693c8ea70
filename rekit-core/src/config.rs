//! Declarative reducer trees.
//!
//! A TOML document describes one reducer and, for object reducers, the inner
//! reducers piped over its fields:
//!
//! ```toml
//! shape = "object"
//! initial = { value = 10, bool = false }
//!
//! [actions]
//! UPDATE = "update"
//!
//! [fields.bool]
//! shape = "bool"
//! actions = { TOGGLE = "toggle" }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::mismatch;
use crate::reduce::{
    create_object_reducer, ArrayReducer, ArrayShape, BoolReducer, BoolShape, Handlers,
    ObjectShape, Shape, ValueReducer, ValueShape,
};
use crate::{BoxReducer, Fields, ReduceError, ReduceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[serde(alias = "boolean")]
    Bool,
    #[serde(alias = "scalar", alias = "property")]
    Value,
    #[serde(alias = "sequence")]
    Array,
    #[serde(alias = "record")]
    Object,
}

impl ShapeKind {
    pub fn default_initial(self) -> Value {
        match self {
            ShapeKind::Bool => BoolShape::default_initial(),
            ShapeKind::Value => ValueShape::default_initial(),
            ShapeKind::Array => ArrayShape::default_initial(),
            ShapeKind::Object => ObjectShape::default_initial(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReducerConfig {
    pub shape: ShapeKind,
    /// Defaults to `false`, `null`, `[]` or `{}` by shape.
    #[serde(default)]
    pub initial: Option<Value>,
    /// Action type -> handler name.
    #[serde(default)]
    pub actions: BTreeMap<String, String>,
    /// Inner reducers, object shape only.
    #[serde(default)]
    pub fields: BTreeMap<String, ReducerConfig>,
}

impl ReducerConfig {
    pub fn from_toml_str(contents: &str) -> ReduceResult<Self> {
        let config: ReducerConfig = toml::from_str(contents)?;
        config.validate("root")?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ReduceResult<Self> {
        log::debug!(target: "config", "loading reducer tree from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self, path: &str) -> ReduceResult<()> {
        if !self.fields.is_empty() && self.shape != ShapeKind::Object {
            return Err(ReduceError::Config(format!(
                "{}: fields are only allowed on object reducers, not {:?}",
                path, self.shape
            )));
        }
        for (name, field) in &self.fields {
            field.validate(&format!("{}.{}", path, name))?;
        }
        Ok(())
    }

    pub fn initial_state(&self) -> Value {
        self.initial
            .clone()
            .unwrap_or_else(|| self.shape.default_initial())
    }

    /// Build the reducer tree. `custom` is offered to every node.
    pub fn build(&self, custom: &Handlers) -> ReduceResult<BoxReducer> {
        let initial = self.initial_state();
        let actions = self.actions.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        let reducer: BoxReducer = match self.shape {
            ShapeKind::Bool => Box::new(BoolReducer::new(initial, actions, custom)?),
            ShapeKind::Value => Box::new(ValueReducer::new(initial, actions, custom)?),
            ShapeKind::Array => Box::new(ArrayReducer::new(initial, actions, custom)?),
            ShapeKind::Object => {
                let record = match initial {
                    Value::Object(record) => record,
                    other => return Err(mismatch(ObjectShape::NAME, &other)),
                };
                let fields = if self.fields.is_empty() {
                    None
                } else {
                    Some(
                        self.fields
                            .iter()
                            .map(|(name, field)| -> ReduceResult<(String, BoxReducer)> {
                                Ok((name.clone(), field.build(custom)?))
                            })
                            .collect::<ReduceResult<Fields>>()?,
                    )
                };
                create_object_reducer(record, actions, custom, fields)?
            }
        };
        Ok(reducer)
    }
}
