//! Application state - shared across all handlers.

use std::sync::Arc;

use yatube_core::ports::{GroupRepository, PostRepository, UserRepository};
use yatube_infra::database::{
    DatabaseConnections, InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use yatube_infra::database::{
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub db: Option<Arc<DatabaseConnections>>,
    pub posts_per_page: u64,
}

impl AppState {
    /// State backed by in-memory repositories.
    pub fn in_memory(posts_per_page: u64) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            groups: Arc::new(InMemoryGroupRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            db: None,
            posts_per_page,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let state = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    Self {
                        users: Arc::new(PostgresUserRepository::new(conn.main.clone())),
                        groups: Arc::new(PostgresGroupRepository::new(conn.main.clone())),
                        posts: Arc::new(PostgresPostRepository::new(conn.main.clone())),
                        db: Some(conn),
                        posts_per_page: config.posts_per_page,
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory(config.posts_per_page)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(config.posts_per_page)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::in_memory(config.posts_per_page)
        };

        tracing::info!(
            persistent = state.db.is_some(),
            posts_per_page = state.posts_per_page,
            "Application state initialized"
        );

        state
    }
}
