//! Default JSON codec strategy.
//!
//! Encoding serializes the model to a JSON value, shapes it according to
//! the dump options, then writes compact or indented text. Decoding parses
//! text through the model's own mapping-construction rule, so nested
//! objects validate recursively. Shaping happens at the value level; the
//! model type never needs to know which options are active.

use std::marker::PhantomData;

use log::{debug, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::error::{FieldError, FieldResult};
use crate::model::SchemaModel;

use super::options::DumpOptions;
use super::Codec;

/// Codec binding a schema model to configurable JSON text.
#[derive(Debug, Clone)]
pub struct JsonCodec<T> {
    options: DumpOptions,
    _model: PhantomData<fn() -> T>,
}

impl<T: SchemaModel> JsonCodec<T> {
    /// Creates a codec with the given dump options.
    ///
    /// Options are checked here; an inconsistent record never reaches the
    /// encode path.
    pub fn new(options: DumpOptions) -> FieldResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            _model: PhantomData,
        })
    }

    /// Returns the bound dump options.
    pub fn options(&self) -> &DumpOptions {
        &self.options
    }

    /// Applies dump options to a serialized value.
    ///
    /// Only top-level object shaping is defined; non-object values pass
    /// through untouched. Returns the shaped value and the names of any
    /// fields the lossy options removed.
    fn shape(&self, value: Value) -> (Value, Vec<String>) {
        let mut map = match value {
            Value::Object(map) => map,
            other => return (other, Vec::new()),
        };
        let mut dropped = Vec::new();

        if let Some(include) = &self.options.include {
            map.retain(|key, _| {
                let keep = include.contains(key);
                if !keep {
                    dropped.push(key.clone());
                }
                keep
            });
        }
        if !self.options.exclude.is_empty() {
            map.retain(|key, _| {
                let keep = !self.options.exclude.contains(key);
                if !keep {
                    dropped.push(key.clone());
                }
                keep
            });
        }
        if self.options.exclude_none {
            map.retain(|key, value| {
                let keep = !value.is_null();
                if !keep {
                    dropped.push(key.clone());
                }
                keep
            });
        }
        if self.options.exclude_defaults || self.options.exclude_unset {
            if let Some(Value::Object(defaults)) = T::default_mapping() {
                map.retain(|key, value| {
                    let keep = defaults.get(key) != Some(&*value);
                    if !keep {
                        dropped.push(key.clone());
                    }
                    keep
                });
            }
        }
        if self.options.by_alias {
            for (field, alias) in T::aliases() {
                if let Some(value) = map.remove(*field) {
                    map.insert((*alias).to_string(), value);
                }
            }
        }

        (Value::Object(map), dropped)
    }

    /// Writes a value as text, honoring the indent option.
    fn write_text(&self, value: &Value) -> FieldResult<String> {
        let text = match self.options.indent {
            None => serde_json::to_string(value)
                .map_err(|e| FieldError::Encode(e.to_string()))?,
            Some(width) => {
                let indent = vec![b' '; width];
                let mut buf = Vec::new();
                let formatter = PrettyFormatter::with_indent(&indent);
                let mut serializer = Serializer::with_formatter(&mut buf, formatter);
                value
                    .serialize(&mut serializer)
                    .map_err(|e| FieldError::Encode(e.to_string()))?;
                String::from_utf8(buf).map_err(|e| FieldError::Encode(e.to_string()))?
            }
        };
        Ok(text)
    }
}

impl<T: SchemaModel> Default for JsonCodec<T> {
    fn default() -> Self {
        Self {
            options: DumpOptions::default(),
            _model: PhantomData,
        }
    }
}

impl<T: SchemaModel> Codec<T> for JsonCodec<T> {
    fn encode_value(&self, model: &T) -> FieldResult<Value> {
        let raw = serde_json::to_value(model).map_err(|e| FieldError::Encode(e.to_string()))?;
        let (shaped, dropped) = self.shape(raw);
        if !dropped.is_empty() && self.options.warn_on_lossy {
            warn!(
                "lossy dump dropped fields: {}",
                dropped.join(", ")
            );
        }
        Ok(shaped)
    }

    fn encode(&self, model: &T) -> FieldResult<String> {
        let value = self.encode_value(model)?;
        self.write_text(&value)
    }

    fn decode(&self, text: &str) -> FieldResult<T> {
        debug!("decoding {} bytes of stored json", text.len());
        T::from_json_text(text)
    }
}
