use super::*;

fn params(email: &str) -> CreateUserParams {
    CreateUserParams {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        display_name: "New User".to_string(),
        phone: None,
        bio: Some("Hello".to_string()),
    }
}

/// Tests creating a user.
///
/// Verifies that the repository assigns an ID, leaves the email unverified and
/// persists the provided profile fields.
///
/// Expected: Ok with user persisted
#[tokio::test]
async fn creates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(params("new@test.com")).await?;

    assert_eq!(user.email, "new@test.com");
    assert_eq!(user.display_name, "New User");
    assert_eq!(user.bio.as_deref(), Some("Hello"));
    assert!(!user.is_email_verified);
    assert!(user.avatar.is_none());

    let stored = entity::prelude::User::find_by_id(user.id).one(db).await?;
    assert!(stored.is_some());

    Ok(())
}

/// Tests the unique index on email.
///
/// Expected: Err on the second insert, one row stored
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(params("dup@test.com")).await?;
    let result = repo.create(params("dup@test.com")).await;

    assert!(result.is_err());
    assert_eq!(entity::prelude::User::find().count(db).await?, 1);

    Ok(())
}
