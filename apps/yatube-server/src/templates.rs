//! Tera template loading and HTML responses.

use std::path::Path;

use actix_web::{
    HttpRequest, HttpResponse, Responder, ResponseError, body::BoxBody,
    http::header::ContentType, web,
};
use tera::{Context, Tera};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppError;

/// Load every `.html` template below `dir`.
pub fn load(dir: &Path) -> Result<Tera, tera::Error> {
    let pattern = format!("{}/**/*.html", dir.display());
    let tera = Tera::new(&pattern)?;
    tracing::info!(
        templates = tera.get_template_names().count(),
        dir = %dir.display(),
        "Templates loaded"
    );
    Ok(tera)
}

/// Context shared by every page: the name of the logged in user, if any.
pub fn base_context(viewer: Option<&Identity>) -> Context {
    let mut context = Context::new();
    context.insert(
        "current_user",
        &viewer.map(|identity| identity.username.as_str()),
    );
    context
}

/// Template name and context attached to rendered responses in test builds.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub name: &'static str,
    pub context: Context,
}

/// A page to be rendered with the application's template engine.
pub struct TemplateResponse {
    template: &'static str,
    context: Context,
}

impl TemplateResponse {
    pub fn new(template: &'static str, context: Context) -> Self {
        Self { template, context }
    }
}

impl Responder for TemplateResponse {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        let Some(tera) = req.app_data::<web::Data<Tera>>() else {
            return AppError::Internal("Template engine not configured".to_string())
                .error_response();
        };

        match tera.render(self.template, &self.context) {
            Ok(body) => {
                tracing::debug!(template = self.template, "Rendered template");
                let response = HttpResponse::Ok()
                    .content_type(ContentType::html())
                    .body(body);

                #[cfg(test)]
                let response = {
                    let mut response = response;
                    response.extensions_mut().insert(RenderedTemplate {
                        name: self.template,
                        context: self.context,
                    });
                    response
                };

                response
            }
            Err(e) => AppError::from(e).error_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode, http::header, test};

    fn engine() -> web::Data<Tera> {
        let mut tera = Tera::default();
        tera.add_raw_template("greeting.html", "Hello, {{ name }}!")
            .unwrap();
        web::Data::new(tera)
    }

    #[actix_web::test]
    async fn test_rendered_page_is_html_with_record() {
        let req = test::TestRequest::default()
            .app_data(engine())
            .to_http_request();
        let mut context = Context::new();
        context.insert("name", "Batman");

        let res = TemplateResponse::new("greeting.html", context).respond_to(&req);

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        let record = res.extensions().get::<RenderedTemplate>().cloned().unwrap();
        assert_eq!(record.name, "greeting.html");
        assert_eq!(record.context.get("name").unwrap(), "Batman");

        let body = to_bytes(res.into_body()).await.unwrap();
        assert_eq!(body, "Hello, Batman!");
    }

    #[actix_web::test]
    async fn test_unknown_template_is_internal_error() {
        let req = test::TestRequest::default()
            .app_data(engine())
            .to_http_request();

        let res = TemplateResponse::new("missing.html", Context::new()).respond_to(&req);

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.extensions().get::<RenderedTemplate>().is_none());
    }
}
