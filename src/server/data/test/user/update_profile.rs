use super::*;

/// Tests a partial profile update.
///
/// Verifies that provided fields change, omitted fields keep their value and empty
/// strings clear optional fields.
///
/// Expected: Ok with only the provided fields changed
#[tokio::test]
async fn updates_provided_fields_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .display_name("Before")
        .phone("555-0100")
        .bio("Old bio")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(
            user.id,
            UpdateProfileParams {
                display_name: Some("After".to_string()),
                phone: Some(String::new()),
                bio: None,
                avatar: Some("https://cdn.test/avatar.png".to_string()),
            },
        )
        .await?;

    assert_eq!(updated.display_name, "After");
    assert!(updated.phone.is_none());
    assert_eq!(updated.bio.as_deref(), Some("Old bio"));
    assert_eq!(updated.avatar.as_deref(), Some("https://cdn.test/avatar.png"));
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.date_joined, user.date_joined);

    Ok(())
}

/// Tests updating a missing user.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn fails_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo
        .update_profile(uuid::Uuid::new_v4(), UpdateProfileParams::default())
        .await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}
