//! Startup helpers run once before the server accepts requests.

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use chrono::Duration;
use tower_http::cors::CorsLayer;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::auth::token::TokenService,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the token service from the configured secret and lifetimes.
pub fn setup_token_service(config: &Config) -> TokenService {
    TokenService::new(
        config.jwt_secret.as_bytes(),
        Duration::seconds(config.access_token_ttl_seconds),
        Duration::seconds(config.refresh_token_ttl_seconds),
    )
}

/// CORS policy for the configured origin.
///
/// Without `CORS_ALLOWED_ORIGIN` no cross-origin requests are allowed.
///
/// # Returns
/// - `Ok(CorsLayer)` - Layer to apply to the router
/// - `Err(ConfigError::InvalidEnvVar)` - Origin is not a valid header value
pub fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let Some(origin) = &config.cors_allowed_origin else {
        return Ok(CorsLayer::new());
    };

    let origin = HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidEnvVar {
        name: "CORS_ALLOWED_ORIGIN".to_string(),
        value: origin.clone(),
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]))
}
