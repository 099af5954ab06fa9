use super::*;

/// Tests changing a role and deleting a membership.
///
/// Expected: role persisted, then the row is gone after delete
#[tokio::test]
async fn updates_role_then_deletes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, server) = factory::helpers::create_server_with_owner(db).await?;
    let (member, membership) =
        factory::helpers::create_member_with_role(db, server.id, "member").await?;

    let repo = MembershipRepository::new(db);
    let updated = repo.update_role(membership.id, MemberRole::Admin).await?;

    assert_eq!(updated.role, MemberRole::Admin);
    assert!(updated.updated_at >= membership.updated_at);
    assert_eq!(
        repo.find_role(server.id, member.id).await?,
        Some(MemberRole::Admin)
    );

    repo.delete(membership.id).await?;
    assert!(repo.find(server.id, member.id).await?.is_none());
    assert_eq!(repo.count_by_server(server.id).await?, 1);

    Ok(())
}
