use crate::{
    model::{membership::MemberRole, server::Visibility},
    server::policy::DenialReason,
};

mod membership;
