//! API data transfer objects.
//!
//! Request and response bodies exchanged over HTTP. Server-side domain models convert into
//! these types at the controller boundary via `into_dto()`.

pub mod api;
pub mod auth;
pub mod membership;
pub mod server;
pub mod user;
