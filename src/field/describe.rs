//! Serializable column description for migration snapshots.
//!
//! The schema reference is recorded as the model's Rust type path, not an
//! inline structural schema. Rebuilding checks the path against the
//! requested type, so a snapshot can only reconstruct the column it was
//! taken from.

use std::any::type_name;

use serde::{Deserialize, Serialize};

use crate::codec::DumpOptions;
use crate::error::{FieldError, FieldResult};
use crate::model::SchemaModel;

use super::column::ModelField;
use super::options::FieldOptions;

/// Migration-facing description of a declared column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescription {
    /// Type path of the bound schema model
    pub model_path: String,
    /// Column declaration options
    pub options: FieldOptions,
    /// Codec dump options
    pub dump_options: DumpOptions,
}

impl ColumnDescription {
    pub(crate) fn new<T: SchemaModel>(options: FieldOptions, dump_options: DumpOptions) -> Self {
        Self {
            model_path: type_name::<T>().to_string(),
            options,
            dump_options,
        }
    }

    /// Returns true when this description was taken from a column bound
    /// to `T`.
    pub fn matches<T: SchemaModel>(&self) -> bool {
        self.model_path == type_name::<T>()
    }

    /// Reconstructs an equivalent, schema-validating column.
    pub fn rebuild<T: SchemaModel>(&self) -> FieldResult<ModelField<T>> {
        if !self.matches::<T>() {
            return Err(FieldError::config(format!(
                "column was declared for model '{}', cannot rebuild as '{}'",
                self.model_path,
                type_name::<T>()
            )));
        }
        ModelField::with_options(self.options.clone(), self.dump_options.clone())
    }
}
