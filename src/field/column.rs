//! The persisted-field column type.
//!
//! A column normalizes every inbound shape to a validated model instance
//! and serializes outbound values through its codec strategy. Validation
//! failures at the persistence boundary always surface as
//! [`FieldError::Validation`]; no serde error type crosses this API.

use std::sync::Arc;

use crate::codec::{Codec, DumpOptions, JsonCodec};
use crate::error::{FieldError, FieldResult};
use crate::forms::ModelFormField;
use crate::model::SchemaModel;

use super::describe::ColumnDescription;
use super::options::FieldOptions;
use super::registry::FieldRegistry;
use super::slot::ModelSlot;
use super::value::FieldInput;

/// A schema-validated JSON column.
///
/// Constructed once per declared column and immutable thereafter. The
/// schema reference is the type parameter; shared across slots and form
/// fields via `Arc`.
pub struct ModelField<T: SchemaModel> {
    options: FieldOptions,
    dump_options: DumpOptions,
    codec: Box<dyn Codec<T>>,
}

impl<T: SchemaModel> ModelField<T> {
    /// Creates a column with default options and the default JSON codec.
    pub fn new() -> Self {
        Self {
            options: FieldOptions::default(),
            dump_options: DumpOptions::default(),
            codec: Box::new(JsonCodec::<T>::default()),
        }
    }

    /// Creates a column with explicit option records.
    ///
    /// Both records are validated here; a misconfigured column cannot be
    /// constructed.
    pub fn with_options(options: FieldOptions, dump_options: DumpOptions) -> FieldResult<Self> {
        options.validate()?;
        let codec = JsonCodec::<T>::new(dump_options.clone())?;
        Ok(Self {
            options,
            dump_options,
            codec: Box::new(codec),
        })
    }

    /// Creates a column with an injected codec strategy.
    ///
    /// The migration description records default dump options in this
    /// case; a custom strategy is responsible for its own configuration.
    pub fn with_codec(options: FieldOptions, codec: Box<dyn Codec<T>>) -> FieldResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            dump_options: DumpOptions::default(),
            codec,
        })
    }

    /// Returns the column declaration options.
    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Returns the dump options recorded for migrations.
    pub fn dump_options(&self) -> &DumpOptions {
        &self.dump_options
    }

    /// Normalizes a value for comparison and display.
    ///
    /// Model instances return unchanged with no re-validation; mappings
    /// construct a model (full schema validation); null stays null.
    pub fn prepare_value(&self, value: FieldInput<T>) -> FieldResult<Option<T>> {
        match value {
            FieldInput::Model(model) => Ok(Some(model)),
            FieldInput::Null => Ok(None),
            other => self.to_python(other),
        }
    }

    /// Converts a stored column value into a model instance.
    ///
    /// NULL passes through. Decode and validation failures carry the
    /// underlying message in the validation error kind.
    pub fn from_db_value(&self, stored: Option<&str>) -> FieldResult<Option<T>> {
        match stored {
            None => Ok(None),
            Some(text) => Ok(Some(self.codec.decode(text)?)),
        }
    }

    /// Converts any accepted input shape into a model instance.
    ///
    /// Text decodes through the codec, mappings construct through the
    /// schema, model instances and null pass through.
    pub fn to_python(&self, value: FieldInput<T>) -> FieldResult<Option<T>> {
        match value {
            FieldInput::Null => Ok(None),
            FieldInput::Model(model) => Ok(Some(model)),
            FieldInput::Text(text) => Ok(Some(self.codec.decode(&text)?)),
            FieldInput::Mapping(map) => Ok(Some(T::from_mapping(map)?)),
        }
    }

    /// Serializes a value for the backing column.
    ///
    /// A missing value is only storable when the column allows NULL.
    pub fn to_stored(&self, value: Option<&T>) -> FieldResult<Option<String>> {
        match value {
            Some(model) => Ok(Some(self.codec.encode(model)?)),
            None if self.options.null => Ok(None),
            None => Err(FieldError::validation(
                "null value in a non-nullable column",
            )),
        }
    }

    /// Re-validates a model instance ahead of a save.
    ///
    /// Direct mutation of an instance can drift past the rule hook; this
    /// round-trips through a plain lossless dump to catch it. The column's
    /// display-oriented dump options deliberately do not apply here.
    pub fn validate_before_save(&self, model: &T) -> FieldResult<()> {
        let text = serde_json::to_string(model).map_err(|e| FieldError::Encode(e.to_string()))?;
        T::from_json_text(&text)?;
        Ok(())
    }

    /// Produces the serializable migration description of this column.
    ///
    /// The schema reference is recorded as the model's type path so a
    /// snapshot can be rebuilt into an equivalent, schema-validating
    /// column.
    pub fn deconstruct(&self) -> ColumnDescription {
        ColumnDescription::new::<T>(self.options.clone(), self.dump_options.clone())
    }

    /// Registers this column on a record type and returns the bound slot
    /// that replaces a plain attribute.
    pub fn contribute_to_class(
        self: &Arc<Self>,
        registry: &mut FieldRegistry,
        name: &str,
    ) -> FieldResult<ModelSlot<T>> {
        registry.register(name, self.deconstruct())?;
        Ok(ModelSlot::new(Arc::clone(self), name))
    }

    /// Derives the form field bound to the same schema and codec.
    pub fn form_field(self: &Arc<Self>) -> ModelFormField<T> {
        ModelFormField::new(Arc::clone(self))
    }
}

impl<T: SchemaModel> Default for ModelField<T> {
    fn default() -> Self {
        Self::new()
    }
}
