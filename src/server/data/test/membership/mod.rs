use crate::{
    model::membership::MemberRole,
    server::{
        data::membership::MembershipRepository,
        error::AppError,
        model::membership::{CreateMembershipParams, ListMembershipsParams},
    },
};
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod count_by_servers;
mod create;
mod list;
mod update_role;
