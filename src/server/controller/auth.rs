use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        auth::{AccessTokenDto, ObtainTokenDto, RefreshTokenDto, TokenPairDto},
    },
    server::{error::AppError, service::auth::AuthService, state::AppState},
};

/// Tag for grouping token endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Exchange email and password for a token pair.
///
/// # Returns
/// - `200 OK` - Access and refresh tokens
/// - `400 Bad Request` - Malformed body
/// - `401 Unauthorized` - No active account with these credentials
#[utoipa::path(
    post,
    path = "/api/token",
    tag = AUTH_TAG,
    request_body = ObtainTokenDto,
    responses(
        (status = 200, description = "Token pair issued", body = TokenPairDto),
        (status = 400, description = "Malformed request body", body = ErrorDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn obtain_token(
    State(state): State<AppState>,
    payload: Result<Json<ObtainTokenDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    let pair = AuthService::new(&state.db, &state.tokens)
        .obtain_token(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(pair.into_dto())))
}

/// Exchange a refresh token for a new access token.
///
/// # Returns
/// - `200 OK` - New access token
/// - `401 Unauthorized` - Token invalid, expired, or not a refresh token
#[utoipa::path(
    post,
    path = "/api/token/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenDto,
    responses(
        (status = 200, description = "Access token issued", body = AccessTokenDto),
        (status = 400, description = "Malformed request body", body = ErrorDto),
        (status = 401, description = "Invalid refresh token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshTokenDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    let access = AuthService::new(&state.db, &state.tokens)
        .refresh(&payload.refresh)
        .await?;

    Ok((StatusCode::OK, Json(AccessTokenDto { access })))
}
