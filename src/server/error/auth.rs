use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization: Bearer <token>` header.
    #[error("Authentication credentials were not provided")]
    MissingToken,

    /// Token failed signature, expiry or type validation.
    ///
    /// # Fields
    /// - Reason reported by the token decoder
    #[error("Token is invalid or expired: {0}")]
    InvalidToken(String),

    /// Email and password did not match an account.
    #[error("No active account found with the given credentials")]
    InvalidCredentials,

    /// Token subject refers to a user that no longer exists.
    #[error("User {0} from token not found in database")]
    UserNotInDatabase(Uuid),
}

/// Converts authentication errors into HTTP responses.
///
/// Every variant maps to 401 Unauthorized. The decoder detail and missing user ID are
/// logged at debug level only; clients receive a fixed message.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let message = match self {
            Self::MissingToken => "Authentication credentials were not provided.",
            Self::InvalidToken(_) | Self::UserNotInDatabase(_) => {
                "Given token not valid for any token type."
            }
            Self::InvalidCredentials => "No active account found with the given credentials.",
        };

        (StatusCode::UNAUTHORIZED, Json(ErrorDto::new(message))).into_response()
    }
}
