//! Per-record-type field table.
//!
//! Stands in for the host framework's record metadata: columns register
//! here when contributed, and the table serializes as the record's
//! migration snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};

use super::describe::ColumnDescription;

/// Columns declared on one record type, keyed by attribute name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRegistry {
    record: String,
    columns: BTreeMap<String, ColumnDescription>,
}

impl FieldRegistry {
    /// Creates an empty registry for the named record type.
    pub fn new(record: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Returns the record type name.
    pub fn record(&self) -> &str {
        &self.record
    }

    /// Registers a column under an attribute name.
    ///
    /// Attribute names are unique per record type.
    pub fn register(&mut self, name: &str, description: ColumnDescription) -> FieldResult<()> {
        if self.columns.contains_key(name) {
            return Err(FieldError::config(format!(
                "attribute '{}' already declared on record '{}'",
                name, self.record
            )));
        }
        self.columns.insert(name.to_string(), description);
        Ok(())
    }

    /// Looks up a column description by attribute name.
    pub fn get(&self, name: &str) -> Option<&ColumnDescription> {
        self.columns.get(name)
    }

    /// Iterates declared attribute names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Serializes the registry as a migration snapshot.
    pub fn snapshot(&self) -> FieldResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FieldError::Encode(e.to_string()))
    }

    /// Restores a registry from snapshot text.
    pub fn from_snapshot(text: &str) -> FieldResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| FieldError::config(format!("malformed migration snapshot: {}", e)))
    }
}
