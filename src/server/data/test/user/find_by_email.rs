use super::*;

/// Tests lookups by email and the existence check.
///
/// Expected: Some for a stored email, None and false otherwise
#[tokio::test]
async fn finds_user_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .email("known@test.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let found = repo.find_by_email("known@test.com").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));
    assert!(repo.email_exists("known@test.com").await?);

    assert!(repo.find_by_email("unknown@test.com").await?.is_none());
    assert!(!repo.email_exists("unknown@test.com").await?);

    Ok(())
}

/// Tests batch lookup by IDs.
///
/// Expected: map containing only the existing users
#[tokio::test]
async fn finds_users_by_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let users = repo
        .find_by_ids(vec![first.id, second.id, uuid::Uuid::new_v4()])
        .await?;

    assert_eq!(users.len(), 2);
    assert_eq!(users[&first.id].email, first.email);
    assert!(repo.find_by_ids(vec![]).await?.is_empty());

    Ok(())
}
