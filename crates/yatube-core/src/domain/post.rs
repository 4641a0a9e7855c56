use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Author, Group};

/// Number of characters of the text used as the post's display name.
const DISPLAY_CHARS: usize = 15;

/// Post entity - a user-authored text entry, optionally categorized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: Uuid,
    pub group_id: Option<i64>,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let short: String = self.text.chars().take(DISPLAY_CHARS).collect();
        f.write_str(&short)
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: Uuid,
    pub group_id: Option<i64>,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post stamped with the current time.
    pub fn new(author_id: Uuid, text: String, group_id: Option<i64>) -> Self {
        Self {
            author_id,
            group_id,
            text,
            pub_date: Utc::now(),
        }
    }

    /// Attach the identifier assigned by storage.
    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            author_id: self.author_id,
            group_id: self.group_id,
            text: self.text,
            pub_date: self.pub_date,
        }
    }
}

/// A post resolved together with its author and group, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub post: Post,
    pub author: Author,
    pub group: Option<Group>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_displays_first_fifteen_chars() {
        let post = NewPost::new(
            Uuid::new_v4(),
            "Тестовый текст длиннее пятнадцати символов".to_string(),
            None,
        )
        .into_post(1);

        assert_eq!(post.to_string(), "Тестовый текст ");
        assert_eq!(post.to_string().chars().count(), 15);
    }

    #[test]
    fn test_short_post_displays_whole_text() {
        let post = NewPost::new(Uuid::new_v4(), "Коротко".to_string(), None).into_post(7);
        assert_eq!(post.to_string(), "Коротко");
    }

    #[test]
    fn test_feed_entry_flattens_post_fields() {
        let author = Author {
            id: Uuid::new_v4(),
            username: "Batman".to_string(),
        };
        let post = NewPost::new(author.id, "text".to_string(), None).into_post(3);
        let entry = FeedEntry {
            post,
            author,
            group: None,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["author"]["username"], "Batman");
        assert!(value["group"].is_null());
    }
}
