//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.

pub mod auth;
pub mod config;
pub mod internal;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{auth::AuthError, config::ConfigError, internal::InternalError},
        policy::Denial,
        util::validation::FieldErrors,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion. Domain-specific errors like `AuthError` and `Denial` handle their
/// own response mapping, while generic variants provide standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Always results in 500 Internal Server Error as configuration issues
    /// prevent normal application operation.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication error.
    ///
    /// Delegates to `AuthError::into_response()`, always 401 Unauthorized.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Authorization or business-rule denial from the policy layer.
    ///
    /// Results in 403 Forbidden or 400 Bad Request depending on the denial reason,
    /// with the reason code included in the body.
    #[error(transparent)]
    Denied(#[from] Denial),

    /// Request body failed field validation.
    ///
    /// Results in 400 Bad Request with per-field messages.
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Unexpected internal failure such as password hashing or token encoding.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// I/O error while binding or serving.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Converts application errors into HTTP responses.
///
/// Maps each error variant to an appropriate HTTP status code and response body.
/// Authentication errors and denials delegate to their own response handling, while
/// other errors use standard mappings. Internal errors are logged with full details
/// but return generic messages to avoid information leakage.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`, `Validation` and business-rule denials
/// - 401 Unauthorized - For `AuthErr`
/// - 403 Forbidden - For authorization denials
/// - 404 Not Found - For `NotFound` variant
/// - 500 Internal Server Error - For all other error types (DbErr, InternalErr, etc.)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::Denied(denial) => denial.into_response(),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "Invalid input.".to_string(),
                    reason: None,
                    fields: Some(errors.into_map()),
                }),
            )
                .into_response(),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, Json(ErrorDto::new(msg))).into_response(),
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(msg))).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details. Used as a fallback for errors that
/// don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Internal server error")),
        )
            .into_response()
    }
}
