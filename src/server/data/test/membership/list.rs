use super::*;

fn params(server_id: Uuid) -> ListMembershipsParams {
    ListMembershipsParams {
        server_id,
        role: None,
        search: None,
    }
}

/// Tests listing a server's memberships with their users.
///
/// Expected: every membership of the server and none from other servers
#[tokio::test]
async fn lists_memberships_with_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, server) = factory::helpers::create_server_with_owner(db).await?;
    let (member, _) = factory::helpers::create_member_with_role(db, server.id, "member").await?;
    factory::helpers::create_server_with_owner(db).await?;

    let repo = MembershipRepository::new(db);
    let rows = repo.list(&params(server.id)).await?;

    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .any(|(m, u)| u.id == owner.id && m.role == MemberRole::Owner));
    assert!(rows
        .iter()
        .any(|(m, u)| u.id == member.id && m.role == MemberRole::Member));

    Ok(())
}

/// Tests role and display-name filters.
///
/// Expected: only memberships matching the filters
#[tokio::test]
async fn filters_by_role_and_display_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, server) = factory::helpers::create_server_with_owner(db).await?;
    let alice = factory::user::UserFactory::new(db)
        .display_name("Alice Admin")
        .build()
        .await?;
    let bob = factory::user::UserFactory::new(db)
        .display_name("Bob")
        .build()
        .await?;
    factory::server_membership::MembershipFactory::new(db, alice.id, server.id)
        .role("admin")
        .build()
        .await?;
    factory::create_membership(db, bob.id, server.id).await?;

    let repo = MembershipRepository::new(db);

    let admins = repo
        .list(&ListMembershipsParams {
            role: Some(MemberRole::Admin),
            ..params(server.id)
        })
        .await?;
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].1.id, alice.id);

    let searched = repo
        .list(&ListMembershipsParams {
            search: Some("aLiCe".to_string()),
            ..params(server.id)
        })
        .await?;
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].1.id, alice.id);

    let none = repo
        .list(&ListMembershipsParams {
            role: Some(MemberRole::Moderator),
            ..params(server.id)
        })
        .await?;
    assert!(none.is_empty());

    Ok(())
}

/// Tests that an underscore in the display-name search matches literally.
///
/// Expected: "_" finds only the user whose name contains an underscore
#[tokio::test]
async fn search_treats_underscore_literally() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::UserFactory::new(db)
        .display_name("Owner")
        .build()
        .await?;
    let server = factory::create_server(db, owner.id).await?;
    let snake = factory::user::UserFactory::new(db)
        .display_name("snake_case")
        .build()
        .await?;
    factory::create_membership(db, snake.id, server.id).await?;

    let repo = MembershipRepository::new(db);
    let searched = repo
        .list(&ListMembershipsParams {
            search: Some("_".to_string()),
            ..params(server.id)
        })
        .await?;

    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].1.id, snake.id);

    Ok(())
}
