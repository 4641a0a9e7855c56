//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use yatube_core::domain::DEFAULT_PER_PAGE;
use yatube_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Posts shown per page on index, group and profile listings.
    pub posts_per_page: u64,
    /// Directory holding the tera templates.
    pub templates_dir: PathBuf,
    /// JSON file with groups to create at startup.
    pub groups_fixture: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            posts_per_page: parse_var("POSTS_PER_PAGE")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PER_PAGE),
            templates_dir: env::var("TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_templates_dir()),
            groups_fixture: env::var("GROUPS_FIXTURE").ok().map(PathBuf::from),
        }
    }
}

/// Templates shipped with the crate.
pub fn default_templates_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
