//! Domain models and operation parameters.
//!
//! Domain models are built from SeaORM entities at the repository boundary via
//! `from_entity()` and converted to API DTOs at the controller boundary via `into_dto()`.
//! Parameter types carry already-validated input from controllers into services.

pub mod membership;
pub mod server;
pub mod user;
