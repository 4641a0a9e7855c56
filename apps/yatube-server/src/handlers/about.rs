//! Static "about" pages.

use crate::middleware::auth::OptionalIdentity;
use crate::templates::{TemplateResponse, base_context};

pub const AUTHOR_TEMPLATE: &str = "about/author.html";
pub const TECH_TEMPLATE: &str = "about/tech.html";

/// GET /about/author/
pub async fn author(viewer: OptionalIdentity) -> TemplateResponse {
    TemplateResponse::new(AUTHOR_TEMPLATE, base_context(viewer.0.as_ref()))
}

/// GET /about/tech/
pub async fn tech(viewer: OptionalIdentity) -> TemplateResponse {
    TemplateResponse::new(TECH_TEMPLATE, base_context(viewer.0.as_ref()))
}
