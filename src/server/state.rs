//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into each handler through Axum's
//! state extraction. Both fields are cheap to clone: `DatabaseConnection` shares its pool
//! and `TokenService` holds only the signing keys and lifetimes.

use sea_orm::DatabaseConnection;

use crate::server::service::auth::token::TokenService;

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Signs and verifies access and refresh tokens.
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, tokens: TokenService) -> Self {
        Self { db, tokens }
    }
}
