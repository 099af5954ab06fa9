//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Validation and the ordering of checks (not-found, then
//!   authorization, then business rules)
//! - **Orchestration**: Coordinating multiple repository calls
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//!
//! Permission decisions themselves live in `server::policy`; services only gather the
//! facts those functions need.

pub mod auth;
pub mod membership;
pub mod server;
pub mod user;

#[cfg(test)]
mod test;
