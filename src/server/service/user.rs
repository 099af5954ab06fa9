//! Registration and profile management.

use sea_orm::{DatabaseConnection, SqlErr};
use uuid::Uuid;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{CreateUserParams, RegisterUserParams, UpdateProfileParams, User},
    service::auth::password::hash_password,
    util::validation::{
        check_max_length, check_password_strength, is_valid_email, FieldErrors,
        NON_FIELD_ERRORS,
    },
};

pub const EMAIL_MAX_LENGTH: usize = 255;
pub const DISPLAY_NAME_MAX_LENGTH: usize = 75;
pub const PHONE_MAX_LENGTH: usize = 20;
pub const BIO_MAX_LENGTH: usize = 500;
pub const AVATAR_MAX_LENGTH: usize = 255;

const REQUIRED: &str = "This field is required.";
const EMAIL_TAKEN: &str = "User with this email already exists.";

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates registration input and creates the account.
    ///
    /// All field errors are collected before returning so the client sees every problem
    /// at once. A concurrent registration with the same email is reported as the same
    /// field error as a sequential one.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::Validation)` - One or more fields are invalid
    /// - `Err(AppError)` - Database or hashing failure
    pub async fn register(&self, params: RegisterUserParams) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);
        let mut errors = FieldErrors::new();

        match params.email.as_deref() {
            None | Some("") => errors.add("email", REQUIRED),
            Some(email) if !is_valid_email(email) => {
                errors.add("email", "Enter a valid email address.")
            }
            Some(email) if email.chars().count() > EMAIL_MAX_LENGTH => {
                check_max_length(&mut errors, "email", email, EMAIL_MAX_LENGTH)
            }
            Some(email) => {
                if repo.email_exists(email).await? {
                    errors.add("email", EMAIL_TAKEN);
                }
            }
        }

        match params.password.as_deref() {
            None | Some("") => errors.add("password", REQUIRED),
            Some(password) => check_password_strength(
                &mut errors,
                password,
                &[
                    ("email", params.email.as_deref().unwrap_or_default()),
                    ("display name", &params.display_name),
                ],
            ),
        }

        if params.password_confirm.as_deref().unwrap_or_default().is_empty() {
            errors.add("password_confirm", REQUIRED);
        }

        check_max_length(
            &mut errors,
            "display_name",
            &params.display_name,
            DISPLAY_NAME_MAX_LENGTH,
        );
        if let Some(phone) = &params.phone {
            check_max_length(&mut errors, "phone", phone, PHONE_MAX_LENGTH);
        }
        if let Some(bio) = &params.bio {
            check_max_length(&mut errors, "bio", bio, BIO_MAX_LENGTH);
        }

        if let (Some(password), Some(confirm)) = (&params.password, &params.password_confirm) {
            if !password.is_empty() && !confirm.is_empty() && password != confirm {
                errors.add(NON_FIELD_ERRORS, "Passwords must match.");
            }
        }

        errors.into_result()?;

        // Both are present once validation passed.
        let (Some(email), Some(password)) = (params.email, params.password) else {
            return Err(AppError::BadRequest("Invalid registration".to_string()));
        };

        let password_hash = hash_password(&password)?;

        let result = repo
            .create(CreateUserParams {
                email,
                password_hash,
                display_name: params.display_name,
                phone: params.phone,
                bio: params.bio,
            })
            .await;

        match result {
            Ok(user) => {
                tracing::info!("Registered user {}", user.id);
                Ok(user)
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                let mut errors = FieldErrors::new();
                errors.add("email", EMAIL_TAKEN);
                Err(errors.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Applies a partial profile update for the given user.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(AppError::Validation)` - A field exceeds its maximum length
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        let mut errors = FieldErrors::new();

        if let Some(display_name) = &params.display_name {
            check_max_length(
                &mut errors,
                "display_name",
                display_name,
                DISPLAY_NAME_MAX_LENGTH,
            );
        }
        if let Some(phone) = &params.phone {
            check_max_length(&mut errors, "phone", phone, PHONE_MAX_LENGTH);
        }
        if let Some(bio) = &params.bio {
            check_max_length(&mut errors, "bio", bio, BIO_MAX_LENGTH);
        }
        if let Some(avatar) = &params.avatar {
            check_max_length(&mut errors, "avatar", avatar, AVATAR_MAX_LENGTH);
        }

        errors.into_result()?;

        Ok(UserRepository::new(self.db)
            .update_profile(user_id, params)
            .await?)
    }
}
