//! Structured-JSON form field bound to a schema.

use std::sync::Arc;

use crate::error::{FieldError, FieldResult};
use crate::field::{FieldInput, ModelField};
use crate::model::SchemaModel;

use super::widget::PrettyJsonWidget;

/// Form field for a schema-validated JSON column.
///
/// Submitted text validates through the column's own decode path: JSON
/// parsing plus schema construction, nothing reimplemented here. The
/// widget defaults to the pretty-printing text area.
pub struct ModelFormField<T: SchemaModel> {
    field: Arc<ModelField<T>>,
    widget: PrettyJsonWidget,
    required: bool,
}

impl<T: SchemaModel> ModelFormField<T> {
    pub(crate) fn new(field: Arc<ModelField<T>>) -> Self {
        let required = !field.options().null;
        Self {
            field,
            widget: PrettyJsonWidget::new(),
            required,
        }
    }

    /// Marks the field as optional regardless of the column's nullability.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn widget(&self) -> &PrettyJsonWidget {
        &self.widget
    }

    /// Returns the owning column.
    pub fn field(&self) -> &ModelField<T> {
        &self.field
    }

    /// Validates submitted text into a model instance.
    ///
    /// Empty input honors `required`; everything else goes through JSON
    /// parsing and schema construction, surfacing one validation error
    /// kind.
    pub fn clean(&self, submitted: Option<&str>) -> FieldResult<Option<T>> {
        let text = submitted.map(str::trim).filter(|t| !t.is_empty());
        match text {
            None if self.required => Err(FieldError::validation("this field is required")),
            None => Ok(None),
            Some(text) => self.field.to_python(FieldInput::Text(text.to_string())),
        }
    }

    /// Renders the field's text area with the current value pretty-printed.
    pub fn render(&mut self, name: &str, current: Option<&T>) -> FieldResult<String> {
        let text = match current {
            Some(model) => self.field.to_stored(Some(model))?.unwrap_or_default(),
            None => String::new(),
        };
        Ok(self.widget.render(name, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        title: String,
        pinned: bool,
    }

    impl SchemaModel for Note {}

    fn form_field() -> ModelFormField<Note> {
        Arc::new(ModelField::<Note>::new()).form_field()
    }

    #[test]
    fn test_clean_valid_text() {
        let note = form_field()
            .clean(Some(r#"{"title": "hello", "pinned": true}"#))
            .unwrap()
            .unwrap();
        assert_eq!(note.title, "hello");
    }

    #[test]
    fn test_clean_empty_required() {
        let err = form_field().clean(Some("   ")).unwrap_err();
        assert!(err.is_validation());
        assert!(form_field().clean(None).is_err());
    }

    #[test]
    fn test_clean_empty_optional() {
        let field = form_field().optional();
        assert_eq!(field.clean(None).unwrap(), None);
    }

    #[test]
    fn test_clean_schema_violation() {
        let err = form_field()
            .clean(Some(r#"{"title": "x", "pinned": "yes"}"#))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_render_includes_current_value() {
        let mut field = form_field();
        let note = Note {
            title: "hello".to_string(),
            pinned: false,
        };
        let html = field.render("note", Some(&note)).unwrap();
        assert!(html.contains("hello"));
        assert!(html.starts_with("<textarea name=\"note\""));
    }
}
