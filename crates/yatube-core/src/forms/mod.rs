//! Form binders - map submitted web form values onto domain records.

mod field;
mod post_form;

pub use field::{BoundField, Choice, FieldKind, Widget};
pub use post_form::{EMPTY_LABEL, INVALID_CHOICE, PostForm, PostFormData, REQUIRED};
