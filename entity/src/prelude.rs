pub use super::server::Entity as Server;
pub use super::server_membership::Entity as ServerMembership;
pub use super::user::Entity as User;
