//! HTTP handlers.
//!
//! Each handler authenticates through `AuthGuard` before reading its body, converts the
//! request DTO into service params, and maps the returned domain model back to a DTO.

pub mod auth;
pub mod membership;
pub mod server;
pub mod user;

#[cfg(test)]
mod test;
