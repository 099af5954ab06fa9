use crate::{
    model::{membership::MemberRole, server::Visibility},
    server::{
        data::server::ServerRepository,
        error::AppError,
        model::server::{CreateServerParams, ListServersParams, UpdateServerParams},
    },
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod create_with_owner;
mod delete;
mod list;
mod update;

fn create_params(owner_id: Uuid, name: &str, visibility: Visibility) -> CreateServerParams {
    CreateServerParams {
        owner_id,
        name: name.to_string(),
        description: String::new(),
        visibility,
        icon: None,
        invite_code: None,
    }
}
