//! Schema model capability.
//!
//! A schema model is a structured-data definition with named typed
//! attributes: any `Serialize + DeserializeOwned` type whose typed
//! deserialization is its validation. Columns and codecs consume the
//! capability through this trait and never inspect model internals.
//!
//! # Invariant
//!
//! Any value stored through a column must satisfy the model's type rules
//! and its [`validate`](SchemaModel::validate) hook before persistence.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FieldError, FieldResult};

/// A schema-validating model type.
///
/// Implementations usually add nothing beyond the marker impl:
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use modelfield::model::SchemaModel;
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Item {
///     name: String,
///     description: String,
///     price: f64,
/// }
///
/// impl SchemaModel for Item {}
/// ```
///
/// `validate` can be overridden for rules the type system cannot express
/// (value ranges, cross-field constraints). `aliases` and `default_mapping`
/// feed the dump options of the bound codec.
pub trait SchemaModel: Serialize + DeserializeOwned + Clone + PartialEq {
    /// Constructs a model instance from a raw JSON mapping.
    ///
    /// Runs full schema validation: typed deserialization followed by the
    /// [`validate`](SchemaModel::validate) hook. Field and type mismatches
    /// surface as [`FieldError::Validation`] carrying the underlying
    /// message.
    fn from_mapping(mapping: Map<String, Value>) -> FieldResult<Self> {
        let model: Self = serde_json::from_value(Value::Object(mapping))
            .map_err(|e| FieldError::Validation(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Constructs a model instance from JSON text.
    ///
    /// The mapping-construction rule applies recursively through nested
    /// objects; parse failures and schema violations are both reported as
    /// [`FieldError::Validation`].
    fn from_json_text(text: &str) -> FieldResult<Self> {
        let model: Self = serde_json::from_str(text)
            .map_err(|e| FieldError::Validation(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Rule-validation hook run after every construction.
    fn validate(&self) -> FieldResult<()> {
        Ok(())
    }

    /// Field-name to alias mapping applied by `by_alias` dumps.
    fn aliases() -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Serialized default values, compared against by `exclude_defaults`
    /// and `exclude_unset` dumps. `None` turns both options into no-ops.
    fn default_mapping() -> Option<Value> {
        None
    }
}

/// The identity case: with no schema configured, decoding yields raw JSON
/// values unchanged and every mapping is accepted.
impl SchemaModel for Value {}
