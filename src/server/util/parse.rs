use crate::{
    model::{membership::MemberRole, server::Visibility},
    server::error::{internal::InternalError, AppError},
};

/// Parses a stored membership role column into a `MemberRole`.
///
/// # Arguments
/// - `value` - The stored role string
///
/// # Returns
/// - `Ok(MemberRole)` - Successfully parsed role
/// - `Err(AppError::InternalErr(ParseEnum))` - Stored value is not a known role
pub fn parse_role(value: &str) -> Result<MemberRole, AppError> {
    MemberRole::parse(value).ok_or_else(|| {
        InternalError::ParseEnum {
            kind: "role",
            value: value.to_string(),
        }
        .into()
    })
}

/// Parses a stored server visibility column into a `Visibility`.
///
/// # Returns
/// - `Ok(Visibility)` - Successfully parsed visibility
/// - `Err(AppError::InternalErr(ParseEnum))` - Stored value is not a known visibility
pub fn parse_visibility(value: &str) -> Result<Visibility, AppError> {
    Visibility::parse(value).ok_or_else(|| {
        InternalError::ParseEnum {
            kind: "visibility",
            value: value.to_string(),
        }
        .into()
    })
}
