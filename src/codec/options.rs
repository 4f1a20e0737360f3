//! Dump configuration record.
//!
//! Every serialization knob is a named, typed, defaulted field, checked
//! once at column construction. There is no runtime keyword filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};

/// Widest indent accepted for dumped text
pub const MAX_INDENT: usize = 16;

/// Serialization options applied when dumping a model to JSON text.
///
/// The default configuration is lossless: compact text, all fields, no
/// aliasing. `round_trip` asserts losslessness and is rejected in
/// combination with any option that can drop or rename fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpOptions {
    /// Spaces of indentation; `None` dumps compact text
    pub indent: Option<usize>,
    /// Keep only these top-level fields
    pub include: Option<BTreeSet<String>>,
    /// Drop these top-level fields
    pub exclude: BTreeSet<String>,
    /// Rename fields through the model's alias map
    pub by_alias: bool,
    /// Drop fields never explicitly assigned
    pub exclude_unset: bool,
    /// Drop fields equal to the model's defaults
    pub exclude_defaults: bool,
    /// Drop null-valued fields
    pub exclude_none: bool,
    /// Guarantee decode(encode(x)) == x
    pub round_trip: bool,
    /// Log a warning whenever a lossy option actually drops a field
    pub warn_on_lossy: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            indent: None,
            include: None,
            exclude: BTreeSet::new(),
            by_alias: false,
            exclude_unset: false,
            exclude_defaults: false,
            exclude_none: false,
            round_trip: false,
            warn_on_lossy: true,
        }
    }
}

impl DumpOptions {
    /// Lossless options with indented output
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            ..Self::default()
        }
    }

    /// Returns true when any option can drop or rename fields
    pub fn is_lossy(&self) -> bool {
        self.include.is_some()
            || !self.exclude.is_empty()
            || self.by_alias
            || self.exclude_unset
            || self.exclude_defaults
            || self.exclude_none
    }

    /// Checks option consistency.
    ///
    /// Rejects `round_trip` combined with any lossy option, overlapping
    /// include/exclude sets, and out-of-range indents.
    pub fn validate(&self) -> FieldResult<()> {
        if let Some(indent) = self.indent {
            if indent == 0 || indent > MAX_INDENT {
                return Err(FieldError::config(format!(
                    "indent must be between 1 and {}, got {}",
                    MAX_INDENT, indent
                )));
            }
        }
        if self.round_trip && self.is_lossy() {
            return Err(FieldError::config(
                "round_trip cannot be combined with lossy dump options",
            ));
        }
        if let Some(include) = &self.include {
            if let Some(overlap) = include.intersection(&self.exclude).next() {
                return Err(FieldError::config(format!(
                    "field '{}' is both included and excluded",
                    overlap
                )));
            }
        }
        Ok(())
    }
}
