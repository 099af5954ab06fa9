//! Credential verification and token issuance.
//!
//! `AuthService` exchanges an email/password pair for an access/refresh token pair and
//! a refresh token for a new access token. Hashing lives in `password`, signing and
//! verification in `token`.

pub mod password;
pub mod token;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    service::auth::token::{TokenPair, TokenService, TokenType},
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// The email is matched case-insensitively. Unknown emails and wrong passwords
    /// produce the same error.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Access and refresh tokens for the user
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - No matching account
    /// - `Err(AppError)` - Database or hashing failure
    pub async fn obtain_token(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let email = email.trim().to_lowercase();

        let Some(user) = UserRepository::new(self.db).find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !password::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!("Issued tokens for user {}", user.id);

        self.tokens.issue_pair(user.id)
    }

    /// Issues a new access token from a valid refresh token.
    ///
    /// # Returns
    /// - `Ok(String)` - New access token
    /// - `Err(AppError::AuthErr)` - Token invalid, expired, not a refresh token, or its
    ///   user no longer exists
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let claims = self.tokens.verify(refresh_token, TokenType::Refresh)?;

        if UserRepository::new(self.db)
            .find_by_id(claims.sub)
            .await?
            .is_none()
        {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        }

        self.tokens.issue(claims.sub, TokenType::Access)
    }
}
