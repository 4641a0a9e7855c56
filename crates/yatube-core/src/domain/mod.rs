//! Domain entities - the core business objects.

mod group;
mod page;
mod post;
mod user;

pub use group::{Group, NewGroup};
pub use page::{DEFAULT_PER_PAGE, Page, PageRequest};
pub use post::{FeedEntry, NewPost, Post};
pub use user::{Author, User};
