use super::*;

/// Tests a partial server update.
///
/// Expected: provided fields changed, others untouched, updated_at bumped
#[tokio::test]
async fn updates_provided_fields_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let server = factory::server::ServerFactory::new(db, owner.id)
        .name("Before")
        .description("Kept")
        .build()
        .await?;

    let repo = ServerRepository::new(db);
    let updated = repo
        .update(
            server.id,
            UpdateServerParams {
                name: Some("After".to_string()),
                visibility: Some(Visibility::Private),
                invite_code: Some("ZyXwV98765".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.name, "After");
    assert_eq!(updated.description, "Kept");
    assert_eq!(updated.visibility, Visibility::Private);
    assert_eq!(updated.invite_code.as_deref(), Some("ZyXwV98765"));
    assert!(updated.updated_at >= server.updated_at);

    Ok(())
}

/// Tests updating a missing server.
///
/// Expected: Err(AppError::DbErr)
#[tokio::test]
async fn fails_for_missing_server() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ServerRepository::new(db);
    let result = repo
        .update(Uuid::new_v4(), UpdateServerParams::default())
        .await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}
