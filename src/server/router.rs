//! Route table and OpenAPI document.

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{AccessTokenDto, ObtainTokenDto, RefreshTokenDto, TokenPairDto},
        membership::{
            GrantMembershipDto, JoinServerDto, MemberRole, MembershipDto, MembershipListDto,
            MembershipResponseDto, UpdateMembershipRoleDto,
        },
        server::{
            CreateServerDto, ServerDto, ServerListDto, ServerResponseDto, UpdateServerDto,
            Visibility,
        },
        user::{RegisterUserDto, UpdateProfileDto, UserDto, UserResponseDto},
    },
    server::{
        controller::{auth, membership, server, user},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::obtain_token,
        auth::refresh_token,
        user::register,
        user::get_profile,
        user::update_profile,
        server::list_servers,
        server::create_server,
        server::get_server,
        server::update_server,
        server::delete_server,
        server::rotate_invite_code,
        membership::list_memberships,
        membership::join_server,
        membership::grant_membership,
        membership::get_membership,
        membership::update_membership_role,
        membership::remove_membership,
    ),
    components(schemas(
        ErrorDto,
        MessageDto,
        ObtainTokenDto,
        RefreshTokenDto,
        TokenPairDto,
        AccessTokenDto,
        UserDto,
        RegisterUserDto,
        UpdateProfileDto,
        UserResponseDto,
        Visibility,
        ServerDto,
        CreateServerDto,
        UpdateServerDto,
        ServerListDto,
        ServerResponseDto,
        MemberRole,
        MembershipDto,
        JoinServerDto,
        GrantMembershipDto,
        UpdateMembershipRoleDto,
        MembershipListDto,
        MembershipResponseDto,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Token issuance and refresh"),
        (name = "user", description = "Registration and profile"),
        (name = "server", description = "Servers and invite codes"),
        (name = "membership", description = "Joining, roles and removal"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by authenticated endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(user::register))
        .route(
            "/api/profile",
            get(user::get_profile).patch(user::update_profile),
        )
        .route("/api/token", post(auth::obtain_token))
        .route("/api/token/refresh", post(auth::refresh_token))
        .route(
            "/api/servers",
            get(server::list_servers).post(server::create_server),
        )
        .route(
            "/api/servers/{server_id}",
            get(server::get_server)
                .patch(server::update_server)
                .delete(server::delete_server),
        )
        .route(
            "/api/servers/{server_id}/invite-code",
            post(server::rotate_invite_code),
        )
        .route(
            "/api/servers/{server_id}/memberships",
            get(membership::list_memberships).post(membership::join_server),
        )
        .route(
            "/api/servers/{server_id}/members",
            post(membership::grant_membership),
        )
        .route(
            "/api/servers/{server_id}/members/{user_id}",
            get(membership::get_membership)
                .patch(membership::update_membership_role)
                .delete(membership::remove_membership),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}
