use super::*;

/// Tests deleting a server removes its memberships.
///
/// Expected: Ok with server and all memberships gone, other servers untouched
#[tokio::test]
async fn deletes_server_and_memberships() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, server) = factory::helpers::create_server_with_owner(db).await?;
    factory::helpers::create_member_with_role(db, server.id, "admin").await?;
    factory::helpers::create_member_with_role(db, server.id, "member").await?;
    let kept = factory::create_server(db, owner.id).await?;

    let repo = ServerRepository::new(db);
    repo.delete(server.id).await?;

    assert!(repo.find_by_id(server.id).await?.is_none());
    assert_eq!(
        entity::prelude::ServerMembership::find()
            .filter(entity::server_membership::Column::ServerId.eq(server.id))
            .count(db)
            .await?,
        0
    );
    assert!(repo.find_by_id(kept.id).await?.is_some());
    assert_eq!(
        entity::prelude::ServerMembership::find()
            .filter(entity::server_membership::Column::ServerId.eq(kept.id))
            .count(db)
            .await?,
        1
    );

    Ok(())
}
