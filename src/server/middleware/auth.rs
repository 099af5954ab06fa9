use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    service::auth::token::{TokenService, TokenType},
};

const BEARER_PREFIX: &str = "Bearer ";

/// Resolves the `Authorization: Bearer <access token>` header into the acting user.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, headers: &'a HeaderMap) -> Self {
        Self { db, tokens, headers }
    }

    /// Requires a valid access token belonging to an existing user.
    ///
    /// # Returns
    /// - `Ok(User)` - The authenticated user
    /// - `Err(AppError::AuthErr(MissingToken))` - No bearer credentials were sent
    /// - `Err(AppError::AuthErr(InvalidToken))` - Token is malformed, expired or a refresh token
    /// - `Err(AppError::AuthErr(UserNotInDatabase))` - Token subject no longer exists
    pub async fn require(&self) -> Result<User, AppError> {
        let Some(header) = self.headers.get(AUTHORIZATION) else {
            return Err(AuthError::MissingToken.into());
        };

        let header = header
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Authorization header is not ASCII".to_string()))?;

        let Some(token) = header.strip_prefix(BEARER_PREFIX).map(str::trim) else {
            return Err(AuthError::MissingToken.into());
        };
        if token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        let claims = self.tokens.verify(token, TokenType::Access)?;

        let Some(user) = UserRepository::new(self.db).find_by_id(claims.sub).await? else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };

        Ok(user)
    }
}
