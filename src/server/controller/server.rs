use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::ErrorDto,
        server::{
            CreateServerDto, ServerListDto, ServerListQuery, ServerResponseDto, UpdateServerDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::server::{CreateServerParams, ListServersParams, ServerDetail, UpdateServerParams},
        service::server::ServerService,
        state::AppState,
    },
};

/// Tag for grouping server endpoints in OpenAPI documentation
pub static SERVER_TAG: &str = "server";

fn server_response(message: &str, detail: ServerDetail) -> Json<ServerResponseDto> {
    Json(ServerResponseDto {
        message: message.to_string(),
        server: detail.into_dto(),
    })
}

/// List servers visible to the authenticated user.
///
/// Public servers are listed for everyone; private servers only for their owner and
/// members. `member_type=owner` restricts to owned servers, any other role to servers
/// where the user holds that role plus the servers they own.
///
/// # Returns
/// - `200 OK` - Matching servers
/// - `400 Bad Request` - Unknown `member_type` or `visibility`
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    get,
    path = "/api/servers",
    tag = SERVER_TAG,
    params(ServerListQuery),
    responses(
        (status = 200, description = "Visible servers", body = ServerListDto),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_servers(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ServerListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Query(query) = query?;

    let servers = ServerService::new(&state.db)
        .list(ListServersParams::from_query(user.id, query))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ServerListDto {
            message: "Success".to_string(),
            servers: servers.into_iter().map(ServerDetail::into_dto).collect(),
        }),
    ))
}

/// Create a server owned by the authenticated user.
///
/// The owner membership is created in the same transaction. Private servers receive a
/// generated invite code.
///
/// # Returns
/// - `201 Created` - The new server with a member count of 1
/// - `400 Bad Request` - Blank or over-long name
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    post,
    path = "/api/servers",
    tag = SERVER_TAG,
    request_body = CreateServerDto,
    responses(
        (status = 201, description = "Server created", body = ServerResponseDto),
        (status = 400, description = "Invalid server data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_server(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateServerDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Json(payload) = payload?;

    let server = ServerService::new(&state.db)
        .create(CreateServerParams::from_dto(user.id, payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        server_response("Server created successfully", server),
    ))
}

/// Get a server.
///
/// # Returns
/// - `200 OK` - The server
/// - `403 Forbidden` - Private server and the user is not a member
/// - `404 Not Found` - No server with this ID
#[utoipa::path(
    get,
    path = "/api/servers/{server_id}",
    tag = SERVER_TAG,
    params(("server_id" = Uuid, Path, description = "Server ID")),
    responses(
        (status = 200, description = "Server details", body = ServerResponseDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Private server", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_server(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Path(server_id) = path?;

    let server = ServerService::new(&state.db).get(server_id, &user).await?;

    Ok((StatusCode::OK, server_response("Success", server)))
}

/// Partially update a server. Owner or admin only.
///
/// # Returns
/// - `200 OK` - Updated server
/// - `400 Bad Request` - Invalid server data
/// - `403 Forbidden` - Neither owner nor admin
/// - `404 Not Found` - No server with this ID
#[utoipa::path(
    patch,
    path = "/api/servers/{server_id}",
    tag = SERVER_TAG,
    params(("server_id" = Uuid, Path, description = "Server ID")),
    request_body = UpdateServerDto,
    responses(
        (status = 200, description = "Server updated", body = ServerResponseDto),
        (status = 400, description = "Invalid server data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner or an admin", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_server(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateServerDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Path(server_id) = path?;
    let Json(payload) = payload?;

    let server = ServerService::new(&state.db)
        .update(server_id, &user, UpdateServerParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        server_response("Server details updated successfully", server),
    ))
}

/// Delete a server and every membership on it. Owner only.
///
/// # Returns
/// - `204 No Content` - Server deleted
/// - `403 Forbidden` - Not the owner
/// - `404 Not Found` - No server with this ID
#[utoipa::path(
    delete,
    path = "/api/servers/{server_id}",
    tag = SERVER_TAG,
    params(("server_id" = Uuid, Path, description = "Server ID")),
    responses(
        (status = 204, description = "Server deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_server(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Path(server_id) = path?;

    ServerService::new(&state.db)
        .delete(server_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Replace the server's invite code. Owner or admin only.
#[utoipa::path(
    post,
    path = "/api/servers/{server_id}/invite-code",
    tag = SERVER_TAG,
    params(("server_id" = Uuid, Path, description = "Server ID")),
    responses(
        (status = 200, description = "Invite code regenerated", body = ServerResponseDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner or an admin", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn rotate_invite_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require()
        .await?;
    let Path(server_id) = path?;

    let server = ServerService::new(&state.db)
        .rotate_invite_code(server_id, &user)
        .await?;

    Ok((
        StatusCode::OK,
        server_response("Invite code regenerated successfully", server),
    ))
}
