//! The post form: an editable view of a `Post` restricted to `group` and `text`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::field::{BoundField, Choice, FieldKind, Widget};
use crate::domain::{Group, NewPost, Post};
use crate::error::DomainError;
use crate::ports::PostRepository;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
/// Label of the "no group" option.
pub const EMPTY_LABEL: &str = "---------";

const CSS_CLASS: &str = "form-control";

/// Raw values submitted by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFormData {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

/// Validated values waiting to be written to a post.
#[derive(Debug, Clone, Default)]
struct PostChanges {
    text: String,
    group_id: Option<i64>,
}

enum Cleaned {
    Text(String),
    Group(Option<i64>),
}

/// Static description of one form field: how it renders, where its raw
/// value comes from, how it is validated and how it is applied.
struct PostField {
    name: &'static str,
    label: &'static str,
    help_text: &'static str,
    kind: FieldKind,
    widget: Widget,
    required: bool,
    initial: fn(&Post) -> String,
    raw: fn(&PostFormData) -> Option<&str>,
    clean: fn(&str, &[Group]) -> Result<Cleaned, &'static str>,
    apply: fn(&mut PostChanges, Cleaned),
}

static POST_FIELDS: [PostField; 2] = [
    PostField {
        name: "group",
        label: "Group",
        help_text: "Group the post belongs to",
        kind: FieldKind::Choice,
        widget: Widget::Select,
        required: false,
        initial: initial_group,
        raw: raw_group,
        clean: clean_group,
        apply: apply_group,
    },
    PostField {
        name: "text",
        label: "Text",
        help_text: "Text of the post",
        kind: FieldKind::Char,
        widget: Widget::Textarea { cols: 40, rows: 10 },
        required: true,
        initial: initial_text,
        raw: raw_text,
        clean: clean_text,
        apply: apply_text,
    },
];

fn initial_group(post: &Post) -> String {
    post.group_id.map(|id| id.to_string()).unwrap_or_default()
}

fn raw_group(data: &PostFormData) -> Option<&str> {
    data.group.as_deref()
}

fn clean_group(raw: &str, groups: &[Group]) -> Result<Cleaned, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Cleaned::Group(None));
    }
    raw.parse::<i64>()
        .ok()
        .filter(|id| groups.iter().any(|g| g.id == *id))
        .map(|id| Cleaned::Group(Some(id)))
        .ok_or(INVALID_CHOICE)
}

fn apply_group(changes: &mut PostChanges, value: Cleaned) {
    if let Cleaned::Group(group_id) = value {
        changes.group_id = group_id;
    }
}

fn initial_text(post: &Post) -> String {
    post.text.clone()
}

fn raw_text(data: &PostFormData) -> Option<&str> {
    data.text.as_deref()
}

fn clean_text(raw: &str, _groups: &[Group]) -> Result<Cleaned, &'static str> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(REQUIRED);
    }
    Ok(Cleaned::Text(text.to_string()))
}

fn apply_text(changes: &mut PostChanges, value: Cleaned) {
    if let Cleaned::Text(text) = value {
        changes.text = text;
    }
}

impl PostField {
    fn bind(&self, value: String, groups: &[Group], errors: Vec<String>) -> BoundField {
        let choices = match self.kind {
            FieldKind::Choice => group_choices(groups, &value),
            FieldKind::Char => Vec::new(),
        };
        BoundField {
            name: self.name,
            label: self.label,
            help_text: self.help_text,
            kind: self.kind,
            widget: self.widget,
            css_class: CSS_CLASS,
            required: self.required,
            value,
            choices,
            errors,
        }
    }
}

fn group_choices(groups: &[Group], selected: &str) -> Vec<Choice> {
    let selected = selected.trim();
    let empty = Choice {
        value: String::new(),
        label: EMPTY_LABEL.to_string(),
        selected: selected.is_empty(),
    };
    std::iter::once(empty)
        .chain(groups.iter().map(|group| {
            let value = group.id.to_string();
            Choice {
                selected: value == selected,
                label: group.title.clone(),
                value,
            }
        }))
        .collect()
}

/// Form for creating a post or editing an existing one.
#[derive(Debug, Clone, Serialize)]
pub struct PostForm {
    pub fields: Vec<BoundField>,
    pub is_bound: bool,
    #[serde(skip)]
    instance: Option<Post>,
    #[serde(skip)]
    cleaned: Option<PostChanges>,
}

impl PostForm {
    /// A form showing the current values of `instance`, or empty values
    /// when creating a new post.
    pub fn unbound(instance: Option<&Post>, groups: &[Group]) -> Self {
        let fields = POST_FIELDS
            .iter()
            .map(|field| {
                let value = instance.map(field.initial).unwrap_or_default();
                field.bind(value, groups, Vec::new())
            })
            .collect();

        Self {
            fields,
            is_bound: false,
            instance: instance.cloned(),
            cleaned: None,
        }
    }

    /// A form populated with submitted values and validated against the
    /// offered `groups`.
    pub fn bind(instance: Option<&Post>, groups: &[Group], data: &PostFormData) -> Self {
        let mut changes = PostChanges::default();
        let mut valid = true;
        let mut fields = Vec::with_capacity(POST_FIELDS.len());

        for field in &POST_FIELDS {
            let raw = (field.raw)(data).unwrap_or_default();
            let errors = match (field.clean)(raw, groups) {
                Ok(value) => {
                    (field.apply)(&mut changes, value);
                    Vec::new()
                }
                Err(message) => {
                    valid = false;
                    vec![message.to_string()]
                }
            };
            fields.push(field.bind(raw.to_string(), groups, errors));
        }

        Self {
            fields,
            is_bound: true,
            instance: instance.cloned(),
            cleaned: valid.then_some(changes),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.cleaned.is_some()
    }

    pub fn field(&self, name: &str) -> Option<&BoundField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validation messages keyed by field name. Empty when valid or unbound.
    pub fn errors(&self) -> BTreeMap<&'static str, Vec<String>> {
        self.fields
            .iter()
            .filter(|f| f.has_errors())
            .map(|f| (f.name, f.errors.clone()))
            .collect()
    }

    pub fn instance(&self) -> Option<&Post> {
        self.instance.as_ref()
    }

    /// Persist the validated data. Creates a post authored by `author_id`,
    /// or updates the bound instance keeping its id, author and date.
    pub async fn save(
        &self,
        posts: &dyn PostRepository,
        author_id: Uuid,
    ) -> Result<Post, DomainError> {
        let changes = self.cleaned.as_ref().ok_or_else(|| {
            DomainError::Validation(format!("post form is invalid: {:?}", self.errors()))
        })?;

        let saved = match &self.instance {
            Some(post) => {
                let updated = Post {
                    text: changes.text.clone(),
                    group_id: changes.group_id,
                    ..post.clone()
                };
                posts.update(updated).await?
            }
            None => {
                let draft = NewPost::new(author_id, changes.text.clone(), changes.group_id);
                posts.create(draft).await?
            }
        };

        Ok(saved)
    }
}
