use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        user::{RegisterUserDto, UpdateProfileDto, UserDto, UserResponseDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::user::{RegisterUserParams, UpdateProfileParams},
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping account endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Register a new account.
///
/// Every invalid field is reported at once under `fields`; mismatched passwords are
/// reported under `non_field_errors`.
///
/// # Returns
/// - `201 Created` - The new user
/// - `400 Bad Request` - Validation failed
#[utoipa::path(
    post,
    path = "/api/register",
    tag = USER_TAG,
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User registered", body = UserResponseDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUserDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    let user = UserService::new(&state.db)
        .register(RegisterUserParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponseDto {
            message: "User registered successfully".to_string(),
            user: user.into_dto(),
        }),
    ))
}

/// Get the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Partially update the authenticated user's profile.
///
/// Read-only fields such as `email`, `id` and `date_joined` are ignored if submitted.
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - A field exceeds its maximum length
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    patch,
    path = "/api/profile",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserResponseDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UpdateProfileDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Json(payload) = payload?;

    let user = UserService::new(&state.db)
        .update_profile(user.id, UpdateProfileParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(UserResponseDto {
            message: "Profile updated successfully".to_string(),
            user: user.into_dto(),
        }),
    ))
}
