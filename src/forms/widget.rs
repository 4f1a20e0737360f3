//! Pretty-printing text area widget.
//!
//! Formatting is a presentation affordance only: the widget re-indents
//! valid JSON for display and sizes the text area to fit, and on anything
//! it cannot parse it falls back to the raw text. It never raises.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

/// Display bounds for the text area
pub const MIN_ROWS: usize = 10;
pub const MAX_ROWS: usize = 60;
pub const MIN_COLS: usize = 40;
pub const MAX_COLS: usize = 200;

const DISPLAY_INDENT: &[u8] = b"    ";

/// Computed text area dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextareaAttrs {
    pub rows: usize,
    pub cols: usize,
}

impl Default for TextareaAttrs {
    fn default() -> Self {
        Self {
            rows: MIN_ROWS,
            cols: MIN_COLS,
        }
    }
}

/// Text area widget that re-indents JSON and sizes itself to the content.
#[derive(Debug, Clone, Default)]
pub struct PrettyJsonWidget {
    attrs: TextareaAttrs,
}

impl PrettyJsonWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last computed display dimensions.
    pub fn attrs(&self) -> &TextareaAttrs {
        &self.attrs
    }

    /// Formats a value for display.
    ///
    /// Valid JSON comes back 4-space indented, and the widget dimensions
    /// update to fit the formatted text, clamped to the display bounds.
    /// Anything else comes back unchanged.
    pub fn format_value(&mut self, value: &str) -> String {
        match self.reformat(value) {
            Some(pretty) => pretty,
            None => value.to_string(),
        }
    }

    fn reformat(&mut self, value: &str) -> Option<String> {
        let parsed: Value = serde_json::from_str(value).ok()?;
        let pretty = pretty_text(&parsed)?;

        let line_count = pretty.lines().count();
        let max_width = pretty.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        self.attrs.rows = (line_count + 2).clamp(MIN_ROWS, MAX_ROWS);
        self.attrs.cols = (max_width + 2).clamp(MIN_COLS, MAX_COLS);

        Some(pretty)
    }

    /// Renders the sized text area element with escaped content.
    pub fn render(&mut self, name: &str, value: &str) -> String {
        let formatted = self.format_value(value);
        format!(
            "<textarea name=\"{}\" rows=\"{}\" cols=\"{}\">{}</textarea>",
            escape(name),
            self.attrs.rows,
            self.attrs.cols,
            escape(&formatted)
        )
    }
}

fn pretty_text(value: &Value) -> Option<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(DISPLAY_INDENT);
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).ok()?;
    String::from_utf8(buf).ok()
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
