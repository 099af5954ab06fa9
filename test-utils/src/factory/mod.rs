//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories insert rows directly through SeaORM active
//! models, bypassing the application's services, so tests can arrange any state they need
//! (including states the services would refuse to produce).
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::user::create_user(&db).await?;
//!     let (owner, server) = factory::helpers::create_server_with_owner(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let server = factory::server::ServerFactory::new(&db, owner.id)
//!     .name("Private Server")
//!     .visibility("private")
//!     .invite_code("ABCDE12345")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `server` - Create server entities (and their owner membership)
//! - `server_membership` - Create membership rows
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod helpers;
pub mod server;
pub mod server_membership;
pub mod user;

pub use server::create_server;
pub use server_membership::create_membership;
pub use user::create_user;
