//! SeaORM entity definitions for the community backend.
//!
//! Role and visibility columns are stored as plain strings; the server crate parses them
//! into domain enums at the repository boundary.

pub mod prelude;

pub mod server;
pub mod server_membership;
pub mod user;
