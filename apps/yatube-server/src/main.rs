//! # Yatube Server
//!
//! Actix-web server for the Yatube blog: post feeds, groups, author
//! profiles and the post form.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use yatube_core::ports::{PasswordService, TokenService};
use yatube_infra::{Argon2PasswordService, JwtTokenService};

mod config;
mod fixtures;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;
mod templates;
mod urls;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    let state = AppState::new(&config).await;

    if let Some(path) = &config.groups_fixture {
        let fixture = fixtures::load_groups_fixture(path).await?;
        let created = fixtures::seed_groups(state.groups.as_ref(), fixture).await?;
        tracing::info!(created, fixture = %path.display(), "Groups fixture applied");
    }

    let tera = web::Data::new(templates::load(&config.templates_dir)?);

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let token_service = web::Data::new(token_service);
    let password_service = web::Data::new(password_service);
    let state = web::Data::new(state);

    tracing::info!("Starting Yatube server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .app_data(tera.clone())
            .app_data(token_service.clone())
            .app_data(password_service.clone())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
