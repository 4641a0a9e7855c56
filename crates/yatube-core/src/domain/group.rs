use serde::{Deserialize, Serialize};

/// Group entity - a named category posts can optionally belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

/// A group that has not been stored yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroup {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

impl NewGroup {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach the identifier assigned by storage.
    pub fn into_group(self, id: i64) -> Group {
        Group {
            id,
            title: self.title,
            slug: self.slug,
            description: self.description,
        }
    }
}
