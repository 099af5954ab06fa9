use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        membership::{
            GrantMembershipDto, JoinServerDto, MembershipListDto, MembershipListQuery,
            MembershipResponseDto, UpdateMembershipRoleDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::membership::{
            GrantMembershipParams, ListMembershipsParams, MembershipDetail, UpdateRoleParams,
        },
        service::membership::MembershipService,
        state::AppState,
    },
};

/// Tag for grouping membership endpoints in OpenAPI documentation
pub static MEMBERSHIP_TAG: &str = "membership";

fn membership_response(message: String, detail: MembershipDetail) -> Json<MembershipResponseDto> {
    Json(MembershipResponseDto {
        message,
        membership: detail.into_dto(),
    })
}

/// List a server's memberships. Owner and members only.
///
/// # Returns
/// - `200 OK` - Memberships filtered by `role` and display-name `search`
/// - `403 Forbidden` - Not a member of the server
/// - `404 Not Found` - No server with this ID
#[utoipa::path(
    get,
    path = "/api/servers/{server_id}/memberships",
    tag = MEMBERSHIP_TAG,
    params(
        ("server_id" = Uuid, Path, description = "Server ID"),
        MembershipListQuery
    ),
    responses(
        (status = 200, description = "Server memberships", body = MembershipListDto),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_memberships(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<MembershipListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Path(server_id) = path?;
    let Query(query) = query?;

    let memberships = MembershipService::new(&state.db)
        .list(&user, ListMembershipsParams::from_query(server_id, query))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MembershipListDto {
            message: "Success".to_string(),
            memberships: memberships
                .into_iter()
                .map(MembershipDetail::into_dto)
                .collect(),
        }),
    ))
}

/// Join a server as `member`.
///
/// The body is optional for public servers. A submitted `role` is ignored.
///
/// # Returns
/// - `201 Created` - The new membership
/// - `400 Bad Request` - Already the owner or a member, or malformed body
/// - `403 Forbidden` - Private server and the invite code is missing or wrong
/// - `404 Not Found` - No server with this ID
#[utoipa::path(
    post,
    path = "/api/servers/{server_id}/memberships",
    tag = MEMBERSHIP_TAG,
    params(("server_id" = Uuid, Path, description = "Server ID")),
    request_body = JoinServerDto,
    responses(
        (status = 201, description = "Joined server", body = MembershipResponseDto),
        (status = 400, description = "Already a member or the owner", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Invalid invite code", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn join_server(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Path(server_id) = path?;
    let payload = parse_optional_body::<JoinServerDto>(&body)?;

    let membership = MembershipService::new(&state.db)
        .join(server_id, &user, payload.invite_code.as_deref())
        .await?;

    let message = format!(
        "Congratulations! You have joined {}.",
        membership.server.server.name
    );

    Ok((StatusCode::CREATED, membership_response(message, membership)))
}

/// Add an existing user to the server. Owner or admin only.
///
/// # Returns
/// - `201 Created` - The new membership
/// - `400 Bad Request` - Role `owner`, or the user already belongs to the server
/// - `403 Forbidden` - Neither owner nor admin
/// - `404 Not Found` - No such server or user
#[utoipa::path(
    post,
    path = "/api/servers/{server_id}/members",
    tag = MEMBERSHIP_TAG,
    params(("server_id" = Uuid, Path, description = "Server ID")),
    request_body = GrantMembershipDto,
    responses(
        (status = 201, description = "Member added", body = MembershipResponseDto),
        (status = 400, description = "Invalid role or already a member", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner or an admin", body = ErrorDto),
        (status = 404, description = "Server or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn grant_membership(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<GrantMembershipDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Path(server_id) = path?;
    let Json(payload) = payload?;

    let membership = MembershipService::new(&state.db)
        .grant(server_id, &user, GrantMembershipParams::from_dto(payload))
        .await?;

    let message = format!(
        "{} has been added to {}.",
        membership.user.display_name, membership.server.server.name
    );

    Ok((StatusCode::CREATED, membership_response(message, membership)))
}

/// Get a single membership.
///
/// Visible to the member themselves, the server owner and server admins.
#[utoipa::path(
    get,
    path = "/api/servers/{server_id}/members/{user_id}",
    tag = MEMBERSHIP_TAG,
    params(
        ("server_id" = Uuid, Path, description = "Server ID"),
        ("user_id" = Uuid, Path, description = "Member's user ID")
    ),
    responses(
        (status = 200, description = "Membership details", body = MembershipResponseDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Permission denied", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_membership(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Path((server_id, user_id)) = path?;

    let membership = MembershipService::new(&state.db)
        .get(server_id, user_id, &user)
        .await?;

    Ok((
        StatusCode::OK,
        membership_response("Success".to_string(), membership),
    ))
}

/// Change another member's role. Owner or admin only.
///
/// Only `role` may be submitted; the owner's role and the caller's own role are
/// immutable, and `owner` cannot be assigned.
///
/// # Returns
/// - `200 OK` - Updated membership
/// - `400 Bad Request` - Immutable target, extra fields, or invalid role
/// - `403 Forbidden` - Not permitted to change this membership
/// - `404 Not Found` - Membership not found
#[utoipa::path(
    patch,
    path = "/api/servers/{server_id}/members/{user_id}",
    tag = MEMBERSHIP_TAG,
    params(
        ("server_id" = Uuid, Path, description = "Server ID"),
        ("user_id" = Uuid, Path, description = "Member's user ID")
    ),
    request_body = UpdateMembershipRoleDto,
    responses(
        (status = 200, description = "Role updated", body = MembershipResponseDto),
        (status = 400, description = "Role change refused", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Permission denied", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_membership_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Path((server_id, user_id)) = path?;
    let Json(payload) = payload?;

    let membership = MembershipService::new(&state.db)
        .update_role(server_id, user_id, &user, UpdateRoleParams::from_body(payload))
        .await?;

    Ok((
        StatusCode::OK,
        membership_response("Member role updated successfully.".to_string(), membership),
    ))
}

/// Leave a server, or remove another member as owner or admin.
///
/// # Returns
/// - `200 OK` - Confirmation message
/// - `400 Bad Request` - Target is the server owner
/// - `403 Forbidden` - Not permitted to remove this membership
/// - `404 Not Found` - Membership not found
#[utoipa::path(
    delete,
    path = "/api/servers/{server_id}/members/{user_id}",
    tag = MEMBERSHIP_TAG,
    params(
        ("server_id" = Uuid, Path, description = "Server ID"),
        ("user_id" = Uuid, Path, description = "Member's user ID")
    ),
    responses(
        (status = 200, description = "Membership removed", body = MessageDto),
        (status = 400, description = "Owner cannot leave", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Permission denied", body = ErrorDto),
        (status = 404, description = "Membership not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn remove_membership(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Path((server_id, user_id)) = path?;

    let message = MembershipService::new(&state.db)
        .remove(server_id, user_id, &user)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto { message })))
}

/// Parses a JSON body that may be empty.
fn parse_optional_body<T>(body: &[u8]) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|err| AppError::BadRequest(format!("Failed to parse the request body as JSON: {}", err)))
}
