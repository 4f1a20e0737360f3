//! modelfield - schema-validated JSON columns for ORM records
//!
//! A JSON column bound to a schema model. Values validate at the
//! persistence boundary and the in-memory attribute is always a model
//! instance, never a raw mapping. Columns describe themselves
//! reconstructably for migrations. The form side renders pretty-printed
//! JSON and parses it back through the same validation path.

pub mod codec;
pub mod error;
pub mod field;
pub mod forms;
pub mod model;
