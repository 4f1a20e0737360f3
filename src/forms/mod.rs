//! User-input counterpart of the column: a structured-JSON form field and
//! the pretty-printing text area widget it renders through.

mod field;
mod widget;

pub use field::ModelFormField;
pub use widget::{PrettyJsonWidget, TextareaAttrs, MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};
