//! Paths of the pages handlers redirect to.

pub fn profile(username: &str) -> String {
    format!("/profile/{username}/")
}

pub fn post_detail(post_id: i64) -> String {
    format!("/posts/{post_id}/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_redirect_targets_match_routes() {
        let app = test::init_service(
            App::new()
                .route("/profile/{username}/", web::get().to(ok))
                .route("/posts/{post_id}/", web::get().to(ok)),
        )
        .await;

        for uri in [profile("Batman"), post_detail(42)] {
            let req = test::TestRequest::get().uri(&uri).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK, "GET {uri}");
        }
    }
}
