use super::*;

fn params(actor_id: Uuid) -> ListServersParams {
    ListServersParams {
        actor_id,
        member_type: None,
        visibility: None,
        search: None,
    }
}

/// Tests private servers are only listed for their owner and members.
///
/// Expected: outsider sees only the public server, member and owner see both
#[tokio::test]
async fn hides_private_servers_from_outsiders() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let public = factory::server::ServerFactory::new(db, owner.id)
        .name("Open")
        .build()
        .await?;
    let private = factory::server::ServerFactory::new(db, owner.id)
        .name("Hidden")
        .visibility("private")
        .invite_code("AbCdE12345")
        .build()
        .await?;
    let (member, _) =
        factory::helpers::create_member_with_role(db, private.id, "member").await?;
    let outsider = factory::create_user(db).await?;

    let repo = ServerRepository::new(db);

    let seen: Vec<Uuid> = repo.list(&params(outsider.id)).await?.iter().map(|s| s.id).collect();
    assert_eq!(seen, vec![public.id]);

    assert_eq!(repo.list(&params(member.id)).await?.len(), 2);
    assert_eq!(repo.list(&params(owner.id)).await?.len(), 2);

    Ok(())
}

/// Tests filtering by the actor's role.
///
/// Verifies that `owner` keeps owned servers only, and a membership role keeps servers
/// with that role plus servers the actor owns.
///
/// Expected: filtered lists per member_type
#[tokio::test]
async fn filters_by_member_type() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let actor = factory::create_user(db).await?;
    let owned = factory::create_server(db, actor.id).await?;

    let other_owner = factory::create_user(db).await?;
    let admin_of = factory::create_server(db, other_owner.id).await?;
    let member_of = factory::create_server(db, other_owner.id).await?;
    factory::create_membership(db, actor.id, member_of.id).await?;
    factory::server_membership::MembershipFactory::new(db, actor.id, admin_of.id)
        .role("admin")
        .build()
        .await?;
    let _unrelated = factory::create_server(db, other_owner.id).await?;

    let repo = ServerRepository::new(db);

    let owner_only = repo
        .list(&ListServersParams {
            member_type: Some(MemberRole::Owner),
            ..params(actor.id)
        })
        .await?;
    assert_eq!(owner_only.iter().map(|s| s.id).collect::<Vec<_>>(), vec![owned.id]);

    let as_member = repo
        .list(&ListServersParams {
            member_type: Some(MemberRole::Member),
            ..params(actor.id)
        })
        .await?;
    let mut ids: Vec<Uuid> = as_member.iter().map(|s| s.id).collect();
    ids.sort();
    let mut expected = vec![owned.id, member_of.id];
    expected.sort();
    assert_eq!(ids, expected);

    let as_admin = repo
        .list(&ListServersParams {
            member_type: Some(MemberRole::Admin),
            ..params(actor.id)
        })
        .await?;
    let mut ids: Vec<Uuid> = as_admin.iter().map(|s| s.id).collect();
    ids.sort();
    let mut expected = vec![owned.id, admin_of.id];
    expected.sort();
    assert_eq!(ids, expected);

    Ok(())
}

/// Tests visibility and case-insensitive name search filters.
///
/// Expected: only servers matching every filter
#[tokio::test]
async fn filters_by_visibility_and_search() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let gaming = factory::server::ServerFactory::new(db, owner.id)
        .name("Gaming Lounge")
        .build()
        .await?;
    let private_gaming = factory::server::ServerFactory::new(db, owner.id)
        .name("Retro GAMING")
        .visibility("private")
        .invite_code("AbCdE12345")
        .build()
        .await?;
    factory::server::ServerFactory::new(db, owner.id)
        .name("Book Club")
        .build()
        .await?;

    let repo = ServerRepository::new(db);

    let found = repo
        .list(&ListServersParams {
            search: Some("gAmInG".to_string()),
            ..params(owner.id)
        })
        .await?;
    assert_eq!(found.len(), 2);

    let found = repo
        .list(&ListServersParams {
            search: Some("gaming".to_string()),
            visibility: Some(Visibility::Public),
            ..params(owner.id)
        })
        .await?;
    assert_eq!(found.iter().map(|s| s.id).collect::<Vec<_>>(), vec![gaming.id]);

    let found = repo
        .list(&ListServersParams {
            visibility: Some(Visibility::Private),
            ..params(owner.id)
        })
        .await?;
    assert_eq!(found.iter().map(|s| s.id).collect::<Vec<_>>(), vec![private_gaming.id]);

    Ok(())
}

/// Tests that `%` and `_` in the search text match literally.
///
/// Expected: "%" finds only the server containing a percent sign, "_" and "a_p" find nothing
#[tokio::test]
async fn search_treats_wildcards_literally() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    factory::server::ServerFactory::new(db, owner.id)
        .name("Alpha")
        .build()
        .await?;
    let percent = factory::server::ServerFactory::new(db, owner.id)
        .name("100% Gamers")
        .build()
        .await?;

    let repo = ServerRepository::new(db);
    let search = |needle: &str| ListServersParams {
        search: Some(needle.to_string()),
        ..params(owner.id)
    };

    let found = repo.list(&search("%")).await?;
    assert_eq!(found.iter().map(|s| s.id).collect::<Vec<_>>(), vec![percent.id]);

    assert!(repo.list(&search("_")).await?.is_empty());
    assert!(repo.list(&search("a_p")).await?.is_empty());

    Ok(())
}
