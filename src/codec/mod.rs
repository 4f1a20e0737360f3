//! Codec between schema-model instances and stored JSON text.
//!
//! Columns do not serialize directly; they hold a boxed [`Codec`] strategy.
//! [`JsonCodec`] is the default, parameterized by [`DumpOptions`]. A custom
//! strategy can be injected at column construction for alternative wire
//! shapes.

mod json;
mod options;

pub use json::JsonCodec;
pub use options::{DumpOptions, MAX_INDENT};

use serde_json::Value;

use crate::error::FieldResult;

/// Encoding/decoding strategy bound to a schema model type.
pub trait Codec<T>: Send + Sync {
    /// Serializes a model instance to a JSON-compatible value,
    /// honoring the strategy's dump configuration.
    fn encode_value(&self, model: &T) -> FieldResult<Value>;

    /// Serializes a model instance to stored text.
    fn encode(&self, model: &T) -> FieldResult<String>;

    /// Deserializes stored text into a model instance, running full
    /// schema validation.
    fn decode(&self, text: &str) -> FieldResult<T>;
}
