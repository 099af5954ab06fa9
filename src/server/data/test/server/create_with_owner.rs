use super::*;

/// Tests creating a server writes the owner membership.
///
/// Verifies that exactly one membership exists after creation, that it belongs to the
/// owner and carries the owner role.
///
/// Expected: Ok with one owner membership
#[tokio::test]
async fn creates_server_with_owner_membership() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;

    let repo = ServerRepository::new(db);
    let server = repo
        .create_with_owner(create_params(owner.id, "Public Server 1", Visibility::Public))
        .await?;

    assert_eq!(server.name, "Public Server 1");
    assert_eq!(server.owner_id, owner.id);
    assert_eq!(server.visibility, Visibility::Public);

    let memberships = entity::prelude::ServerMembership::find()
        .filter(entity::server_membership::Column::ServerId.eq(server.id))
        .all(db)
        .await?;
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].user_id, owner.id);
    assert_eq!(memberships[0].role, MemberRole::Owner.as_str());

    Ok(())
}

/// Tests a failed creation leaves nothing behind.
///
/// Uses an owner ID with no user row so the foreign key rejects the inserts.
///
/// Expected: Err with no server and no membership stored
#[tokio::test]
async fn rolls_back_when_owner_missing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ServerRepository::new(db);
    let result = repo
        .create_with_owner(create_params(Uuid::new_v4(), "Orphan", Visibility::Public))
        .await;

    assert!(result.is_err());
    assert_eq!(entity::prelude::Server::find().count(db).await?, 0);
    assert_eq!(entity::prelude::ServerMembership::find().count(db).await?, 0);

    Ok(())
}
