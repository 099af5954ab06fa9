use super::*;
use crate::server::{
    model::user::{RegisterUserParams, UpdateProfileParams},
    service::user::UserService,
    util::validation::NON_FIELD_ERRORS,
};

fn registration(email: &str, password: &str, confirm: &str) -> RegisterUserParams {
    RegisterUserParams {
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        password_confirm: Some(confirm.to_string()),
        display_name: "Grace".to_string(),
        phone: None,
        bio: None,
    }
}

fn field_errors<T: std::fmt::Debug>(
    result: Result<T, AppError>,
) -> std::collections::BTreeMap<String, Vec<String>> {
    match result {
        Err(AppError::Validation(errors)) => errors.into_map(),
        other => panic!("expected validation error, got {:?}", other),
    }
}

/// Tests registering a new account.
///
/// Expected: Ok with the password stored as a hash, not plaintext
#[tokio::test]
async fn registers_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserService::new(db)
        .register(registration("grace@example.com", "Sturdy-Harbor-42", "Sturdy-Harbor-42"))
        .await?;

    assert_eq!(user.email, "grace@example.com");
    assert_eq!(user.display_name, "Grace");
    assert!(!user.is_email_verified);
    assert_ne!(user.password_hash, "Sturdy-Harbor-42");
    assert!(user.password_hash.starts_with("$argon2"));

    Ok(())
}

/// Tests registering an email that already has an account.
///
/// Expected: Err(Validation) on `email`
#[tokio::test]
async fn rejects_taken_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::user::UserFactory::new(db)
        .email("grace@example.com")
        .build()
        .await?;

    let result = UserService::new(db)
        .register(registration("grace@example.com", "Sturdy-Harbor-42", "Sturdy-Harbor-42"))
        .await;

    let errors = field_errors(result);
    assert_eq!(
        errors.get("email"),
        Some(&vec!["User with this email already exists.".to_string()])
    );

    Ok(())
}

/// Tests mismatched confirmation and a weak password are reported together.
///
/// Expected: Err(Validation) with both `password` and `non_field_errors`
#[tokio::test]
async fn collects_all_errors() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserService::new(db)
        .register(registration("grace@example.com", "12345678", "87654321"))
        .await;

    let errors = field_errors(result);
    assert!(errors.contains_key("password"));
    assert_eq!(
        errors.get(NON_FIELD_ERRORS),
        Some(&vec!["Passwords must match.".to_string()])
    );

    Ok(())
}

/// Tests missing required fields.
///
/// Expected: Err(Validation) for email, password and password_confirm
#[tokio::test]
async fn requires_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserService::new(db)
        .register(RegisterUserParams {
            email: None,
            password: None,
            password_confirm: None,
            display_name: "User".to_string(),
            phone: None,
            bio: None,
        })
        .await;

    let errors = field_errors(result);
    for field in ["email", "password", "password_confirm"] {
        assert_eq!(
            errors.get(field),
            Some(&vec!["This field is required.".to_string()]),
            "{}",
            field
        );
    }

    Ok(())
}

/// Tests a partial profile update.
///
/// Expected: Ok with only the submitted fields changed
#[tokio::test]
async fn updates_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = create_actor(db).await?;

    let updated = UserService::new(db)
        .update_profile(
            user.id,
            UpdateProfileParams {
                bio: Some("Compilers".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.bio.as_deref(), Some("Compilers"));
    assert_eq!(updated.display_name, user.display_name);
    assert_eq!(updated.email, user.email);

    Ok(())
}

/// Tests an over-long display name.
///
/// Expected: Err(Validation) on `display_name`
#[tokio::test]
async fn rejects_long_display_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = create_actor(db).await?;

    let result = UserService::new(db)
        .update_profile(
            user.id,
            UpdateProfileParams {
                display_name: Some("x".repeat(76)),
                ..Default::default()
            },
        )
        .await;

    assert!(field_errors(result).contains_key("display_name"));

    Ok(())
}
