//! Attribute Slot Invariant Tests
//!
//! Invariants exercised here:
//! - After any set, the readable value is a model instance
//! - Raw boundary values validate exactly once per hydration
//! - Failed conversions never destroy the held value

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use modelfield::error::FieldResult;
use modelfield::field::{FieldRegistry, ModelField, ModelSlot};
use modelfield::model::SchemaModel;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

// =============================================================================
// Helper Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Tag {
    label: String,
}

impl SchemaModel for Tag {}

// Counting model for the memoization tests. Those tests serialize on
// COUNTER_LOCK so concurrent test threads cannot skew the deltas; no other
// test uses this type.
static VALIDATIONS: AtomicUsize = AtomicUsize::new(0);
static COUNTER_LOCK: Mutex<()> = Mutex::new(());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Counted {
    label: String,
}

impl SchemaModel for Counted {
    fn validate(&self) -> FieldResult<()> {
        VALIDATIONS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn mapping(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

fn contribute<T: SchemaModel>(name: &str) -> (Arc<ModelField<T>>, ModelSlot<T>) {
    let field = Arc::new(ModelField::<T>::new());
    let mut registry = FieldRegistry::new("Record");
    let slot = field.contribute_to_class(&mut registry, name).unwrap();
    (field, slot)
}

// =============================================================================
// Invariant: reads never observe a raw mapping
// =============================================================================

/// Assigning a raw mapping reads back as a model instance.
#[test]
fn test_set_mapping_reads_back_model() {
    let (_field, mut slot) = contribute::<Tag>("payload");

    slot.set(mapping(json!({"label": "alpha"}))).unwrap();

    let value = slot.get().unwrap().unwrap();
    assert_eq!(value.label, "alpha");
}

/// Assigning JSON text reads back as a model instance.
#[test]
fn test_set_text_reads_back_model() {
    let (_field, mut slot) = contribute::<Tag>("payload");

    slot.set(r#"{"label": "beta"}"#).unwrap();

    assert_eq!(slot.get().unwrap().unwrap().label, "beta");
}

/// A hydrated slot converts on first read and is no longer raw afterwards.
#[test]
fn test_hydrated_slot_converts_on_read() {
    let (_field, mut slot) = contribute::<Tag>("payload");

    slot.hydrate(mapping(json!({"label": "gamma"})));
    assert!(slot.is_hydrated());

    assert_eq!(slot.get().unwrap().unwrap().label, "gamma");
    assert!(!slot.is_hydrated());
}

/// Assigning null empties the slot.
#[test]
fn test_set_null_empties_slot() {
    let (_field, mut slot) = contribute::<Tag>("payload");
    slot.set(mapping(json!({"label": "x"}))).unwrap();

    slot.set(Value::Null).unwrap();

    assert_eq!(slot.get().unwrap(), None);
}

// =============================================================================
// Invariant: validate-once memoization
// =============================================================================

/// Repeated reads after hydration run the conversion exactly once.
#[test]
fn test_conversion_memoized_across_reads() {
    let _guard = COUNTER_LOCK.lock().unwrap();
    let (_field, mut slot) = contribute::<Counted>("payload");

    slot.hydrate(mapping(json!({"label": "once"})));

    let before = VALIDATIONS.load(Ordering::SeqCst);
    slot.get().unwrap();
    slot.get().unwrap();
    slot.get().unwrap();
    let after = VALIDATIONS.load(Ordering::SeqCst);

    assert_eq!(after - before, 1);
}

/// Reading a directly assigned model instance never re-validates.
#[test]
fn test_model_assignment_not_revalidated_on_read() {
    let _guard = COUNTER_LOCK.lock().unwrap();
    let (_field, mut slot) = contribute::<Counted>("payload");

    slot.set_model(Counted {
        label: "direct".to_string(),
    });

    let before = VALIDATIONS.load(Ordering::SeqCst);
    slot.get().unwrap();
    slot.get().unwrap();
    let after = VALIDATIONS.load(Ordering::SeqCst);

    assert_eq!(after, before);
}

// =============================================================================
// Failure Behavior
// =============================================================================

/// A failing hydrated value reports the same error on every read and
/// keeps the raw value in place.
#[test]
fn test_failed_coercion_is_repeatable() {
    let (_field, mut slot) = contribute::<Tag>("payload");

    slot.hydrate(mapping(json!({"label": 42})));

    let first = slot.get().unwrap_err();
    let second = slot.get().unwrap_err();
    assert_eq!(first, second);
    assert!(slot.is_hydrated());
}

/// A failed assignment leaves the previous value readable.
#[test]
fn test_failed_set_preserves_previous_value() {
    let (_field, mut slot) = contribute::<Tag>("payload");
    slot.set(mapping(json!({"label": "kept"}))).unwrap();

    assert!(slot.set(mapping(json!({"label": 42}))).is_err());

    assert_eq!(slot.get().unwrap().unwrap().label, "kept");
}

// =============================================================================
// Save Path
// =============================================================================

/// The slot serializes its held model for storage, coercing first if
/// needed.
#[test]
fn test_slot_to_stored_from_hydrated_text() {
    let (_field, mut slot) = contribute::<Tag>("payload");

    slot.hydrate(r#"{"label": "stored"}"#);

    let stored = slot.to_stored().unwrap().unwrap();
    assert_eq!(stored, r#"{"label":"stored"}"#);
}

/// Pre-save re-validation passes for a well-formed held value.
#[test]
fn test_slot_pre_save_validation() {
    let (_field, mut slot) = contribute::<Tag>("payload");

    slot.set(mapping(json!({"label": "ok"}))).unwrap();

    assert!(slot.validate_before_save().is_ok());
}

// =============================================================================
// Contribution
// =============================================================================

/// Contributing binds the slot to its column and records the attribute.
#[test]
fn test_contribute_binds_slot_and_registers() {
    let field = Arc::new(ModelField::<Tag>::new());
    let mut registry = FieldRegistry::new("Record");

    let slot = field.contribute_to_class(&mut registry, "payload").unwrap();

    assert_eq!(slot.name(), "payload");
    assert!(registry.get("payload").is_some());
    assert!(registry.get("payload").unwrap().matches::<Tag>());
}

/// The same attribute name cannot be contributed twice.
#[test]
fn test_duplicate_contribution_rejected() {
    let field = Arc::new(ModelField::<Tag>::new());
    let mut registry = FieldRegistry::new("Record");

    field.contribute_to_class(&mut registry, "payload").unwrap();
    assert!(field.contribute_to_class(&mut registry, "payload").is_err());
}

/// The slot exposes its owning column.
#[test]
fn test_slot_exposes_column() {
    let (_field, slot) = contribute::<Tag>("payload");
    assert!(!slot.field().options().null);
}
