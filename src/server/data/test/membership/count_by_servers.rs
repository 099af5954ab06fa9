use super::*;

/// Tests batch member counts and roles.
///
/// Expected: counts per server, actor roles only where the actor is a member
#[tokio::test]
async fn counts_members_per_server() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, busy) = factory::helpers::create_server_with_owner(db).await?;
    factory::helpers::create_member_with_role(db, busy.id, "member").await?;
    factory::helpers::create_member_with_role(db, busy.id, "moderator").await?;
    let quiet = factory::create_server(db, owner.id).await?;
    let empty = factory::server::ServerFactory::new(db, owner.id)
        .without_owner_membership()
        .build()
        .await?;

    let repo = MembershipRepository::new(db);
    let counts = repo
        .count_by_servers(vec![busy.id, quiet.id, empty.id])
        .await?;

    assert_eq!(counts.get(&busy.id), Some(&3));
    assert_eq!(counts.get(&quiet.id), Some(&1));
    assert_eq!(counts.get(&empty.id), None);

    let roles = repo
        .roles_for_user(owner.id, vec![busy.id, quiet.id, empty.id])
        .await?;
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[&busy.id], MemberRole::Owner);

    Ok(())
}

/// Tests counting only the requested servers.
///
/// Expected: unrequested servers are absent; no ids gives an empty map
#[tokio::test]
async fn counts_only_requested_servers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, wanted) = factory::helpers::create_server_with_owner(db).await?;
    factory::helpers::create_member_with_role(db, wanted.id, "admin").await?;
    let (_, other) = factory::helpers::create_server_with_owner(db).await?;
    factory::helpers::create_member_with_role(db, other.id, "member").await?;
    factory::helpers::create_member_with_role(db, other.id, "member").await?;

    let repo = MembershipRepository::new(db);
    let counts = repo.count_by_servers(vec![wanted.id]).await?;

    assert_eq!(counts.len(), 1);
    assert_eq!(counts[&wanted.id], 2);
    assert!(!counts.contains_key(&other.id));

    assert!(repo.count_by_servers(Vec::new()).await?.is_empty());

    Ok(())
}
