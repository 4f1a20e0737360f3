//! Persisted-field column type and its attribute slot.
//!
//! # Design Principles
//!
//! - Every inbound shape normalizes to a validated model instance
//! - The in-memory attribute value is never a raw mapping
//! - Raw boundary values validate exactly once per assignment
//! - Validation failures surface as one uniform error kind
//! - Columns describe themselves reconstructably for migrations

mod column;
mod describe;
mod options;
mod registry;
mod slot;
mod value;

pub use column::ModelField;
pub use describe::ColumnDescription;
pub use options::FieldOptions;
pub use registry::FieldRegistry;
pub use slot::ModelSlot;
pub use value::{FieldInput, RawValue};
