//! Persisted-field configuration record.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};

/// Column declaration options, independent of the codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Whether SQL NULL is allowed in the backing column
    pub null: bool,
    /// Override for the backing column name
    pub db_column: Option<String>,
    /// Whether the column is exposed through derived form fields
    pub editable: bool,
    /// Help text surfaced by derived form fields
    pub help_text: Option<String>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            null: false,
            db_column: None,
            editable: true,
            help_text: None,
        }
    }
}

impl FieldOptions {
    /// Options allowing SQL NULL
    pub fn nullable() -> Self {
        Self {
            null: true,
            ..Self::default()
        }
    }

    /// Checks option consistency.
    pub fn validate(&self) -> FieldResult<()> {
        if let Some(column) = &self.db_column {
            if column.is_empty() || column.chars().any(|c| c.is_whitespace()) {
                return Err(FieldError::config(format!(
                    "invalid db_column name '{}'",
                    column
                )));
            }
        }
        Ok(())
    }
}
