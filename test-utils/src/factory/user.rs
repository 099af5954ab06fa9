//! User factory for creating test user entities.
//!
//! This module provides factory methods for creating user entities with sensible
//! defaults. The factory supports customization through a builder pattern.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Placeholder credential stored by default; it is not a valid Argon2 hash so logins
/// against factory users fail unless a real hash is supplied.
pub const PLACEHOLDER_PASSWORD_HASH: &str = "not-a-real-hash";

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .email("owner@test.com")
///     .display_name("Server Owner")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    email: String,
    password_hash: String,
    display_name: String,
    phone: Option<String>,
    bio: Option<String>,
    is_email_verified: bool,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - id: random UUID v4
    /// - email: `"user{n}@test.com"` where n is auto-incremented
    /// - display_name: `"User {n}"`
    /// - password_hash: [`PLACEHOLDER_PASSWORD_HASH`]
    /// - phone / bio: `None`
    /// - is_email_verified: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: Uuid::new_v4(),
            email: format!("user{}@test.com", id),
            password_hash: PLACEHOLDER_PASSWORD_HASH.to_string(),
            display_name: format!("User {}", id),
            phone: None,
            bio: None,
            is_email_verified: false,
        }
    }

    /// Sets the email for the user. Stored as given; callers pass lower-case values.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the stored password hash.
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    /// Sets the display name for the user.
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the phone number.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the biography.
    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Sets the email verification flag.
    pub fn email_verified(mut self, verified: bool) -> Self {
        self.is_email_verified = verified;
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Set(self.id),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            display_name: ActiveValue::Set(self.display_name),
            phone: ActiveValue::Set(self.phone),
            bio: ActiveValue::Set(self.bio),
            avatar: ActiveValue::Set(None),
            is_email_verified: ActiveValue::Set(self.is_email_verified),
            date_joined: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}
