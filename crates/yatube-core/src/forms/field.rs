use serde::Serialize;

/// The kind of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text.
    Char,
    /// One value out of a bounded set of choices.
    Choice,
}

/// Presentation hint for rendering a field. Carries no validation meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    Textarea { cols: u16, rows: u16 },
    Select,
}

/// One option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A field together with its current value and validation errors.
#[derive(Debug, Clone, Serialize)]
pub struct BoundField {
    pub name: &'static str,
    pub label: &'static str,
    pub help_text: &'static str,
    pub kind: FieldKind,
    pub widget: Widget,
    pub css_class: &'static str,
    pub required: bool,
    pub value: String,
    pub choices: Vec<Choice>,
    pub errors: Vec<String>,
}

impl BoundField {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn selected_choice(&self) -> Option<&Choice> {
        self.choices.iter().find(|c| c.selected)
    }
}
