//! Typed attribute slot.
//!
//! The slot replaces a plain record attribute with explicit accessors: a
//! lazy coercion cache. Reads coerce a raw boundary value into a model
//! instance and memoize the result; writes validate anything that is not
//! already a model instance before storing. After any successful `get` or
//! `set`, the observable value is a model instance, never a raw mapping.
//!
//! Accessors take `&mut self`; concurrent unsynchronized mutation of one
//! record instance is rejected at compile time.

use std::sync::Arc;

use log::debug;

use crate::error::FieldResult;
use crate::model::SchemaModel;

use super::column::ModelField;
use super::value::{FieldInput, RawValue};

enum SlotState<T> {
    Empty,
    Raw(RawValue),
    Model(T),
}

/// Attribute slot bound to a column.
pub struct ModelSlot<T: SchemaModel> {
    field: Arc<ModelField<T>>,
    name: String,
    state: SlotState<T>,
}

impl<T: SchemaModel> ModelSlot<T> {
    pub(crate) fn new(field: Arc<ModelField<T>>, name: &str) -> Self {
        Self {
            field,
            name: name.to_string(),
            state: SlotState::Empty,
        }
    }

    /// Returns the attribute name this slot was contributed under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning column, the object a type-level access yields.
    pub fn field(&self) -> &ModelField<T> {
        &self.field
    }

    /// Reads the slot value.
    ///
    /// A raw boundary value is converted in place and cached, so the
    /// conversion runs at most once per assignment. A failed conversion
    /// leaves the raw value where it was; a later read reports the same
    /// error.
    pub fn get(&mut self) -> FieldResult<Option<&T>> {
        let state = std::mem::replace(&mut self.state, SlotState::Empty);
        let next = match state {
            SlotState::Raw(raw) => {
                debug!("coercing raw value in slot '{}'", self.name);
                match self.field.to_python(raw.clone().into_input()) {
                    Ok(Some(model)) => SlotState::Model(model),
                    Ok(None) => SlotState::Empty,
                    Err(err) => {
                        self.state = SlotState::Raw(raw);
                        return Err(err);
                    }
                }
            }
            other => other,
        };
        self.state = next;
        match &self.state {
            SlotState::Model(model) => Ok(Some(model)),
            _ => Ok(None),
        }
    }

    /// Assigns a value, converting anything that is not already a model
    /// instance first. A failed conversion leaves the previous value
    /// untouched.
    pub fn set(&mut self, value: impl Into<FieldInput<T>>) -> FieldResult<()> {
        let next = match value.into() {
            FieldInput::Model(model) => SlotState::Model(model),
            FieldInput::Null => SlotState::Empty,
            other => match self.field.to_python(other)? {
                Some(model) => SlotState::Model(model),
                None => SlotState::Empty,
            },
        };
        self.state = next;
        Ok(())
    }

    /// Stores an already-validated model instance as-is.
    pub fn set_model(&mut self, model: T) {
        self.state = SlotState::Model(model);
    }

    /// Boundary fast path: stores a raw value without validating.
    /// The next read pays the conversion.
    pub fn hydrate(&mut self, raw: impl Into<RawValue>) {
        self.state = SlotState::Raw(raw.into());
    }

    /// Returns true while an unconverted raw value is held.
    pub fn is_hydrated(&self) -> bool {
        matches!(self.state, SlotState::Raw(_))
    }

    /// Empties the slot.
    pub fn clear(&mut self) {
        self.state = SlotState::Empty;
    }

    /// Removes and returns the value, coercing a raw form first.
    pub fn take(&mut self) -> FieldResult<Option<T>> {
        self.get()?;
        match std::mem::replace(&mut self.state, SlotState::Empty) {
            SlotState::Model(model) => Ok(Some(model)),
            _ => Ok(None),
        }
    }

    /// Serializes the current value for the backing column.
    pub fn to_stored(&mut self) -> FieldResult<Option<String>> {
        self.get()?;
        match &self.state {
            SlotState::Model(model) => self.field.to_stored(Some(model)),
            _ => self.field.to_stored(None),
        }
    }

    /// Runs the column's pre-save re-validation on the held value.
    pub fn validate_before_save(&mut self) -> FieldResult<()> {
        self.get()?;
        if let SlotState::Model(model) = &self.state {
            self.field.validate_before_save(model)?;
        }
        Ok(())
    }
}
