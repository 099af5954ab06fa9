//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles registration inserts, lookups by ID or email, and profile updates with
//! conversion between entity models and domain models at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::server::model::user::{CreateUserParams, UpdateProfileParams, User};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new user with a generated ID.
    ///
    /// The email must already be normalized by the caller.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a unique violation on email
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            display_name: ActiveValue::Set(params.display_name),
            phone: ActiveValue::Set(params.phone),
            bio: ActiveValue::Set(params.bio),
            avatar: ActiveValue::Set(None),
            is_email_verified: ActiveValue::Set(false),
            date_joined: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by normalized email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Checks whether any user already uses the normalized email.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Loads several users at once keyed by ID.
    ///
    /// IDs with no matching user are absent from the map.
    pub async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<HashMap<Uuid, User>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids))
            .all(self.db)
            .await?;

        Ok(users
            .into_iter()
            .map(|u| (u.id, User::from_entity(u)))
            .collect())
    }

    /// Applies a partial profile update.
    ///
    /// Email, ID, verification state and join date are never touched.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(DbErr::RecordNotFound)` - No user with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_profile(
        &self,
        id: Uuid,
        params: UpdateProfileParams,
    ) -> Result<User, DbErr> {
        let entity = entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("User with id {} not found", id)))?;

        let mut active = entity.into_active_model();

        if let Some(display_name) = params.display_name {
            active.display_name = ActiveValue::Set(display_name);
        }
        if let Some(phone) = params.phone {
            active.phone = ActiveValue::Set(non_empty(phone));
        }
        if let Some(bio) = params.bio {
            active.bio = ActiveValue::Set(non_empty(bio));
        }
        if let Some(avatar) = params.avatar {
            active.avatar = ActiveValue::Set(non_empty(avatar));
        }

        let entity = active.update(self.db).await?;

        Ok(User::from_entity(entity))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
