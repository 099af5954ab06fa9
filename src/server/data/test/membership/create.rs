use super::*;

/// Tests creating a membership.
///
/// Expected: Ok with the membership readable through `find`
#[tokio::test]
async fn creates_membership() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, server) = factory::helpers::create_server_with_owner(db).await?;
    let user = factory::create_user(db).await?;

    let repo = MembershipRepository::new(db);
    let membership = repo
        .create(CreateMembershipParams {
            user_id: user.id,
            server_id: server.id,
            role: MemberRole::Moderator,
        })
        .await?;

    assert_eq!(membership.role, MemberRole::Moderator);
    assert_eq!(
        repo.find_role(server.id, user.id).await?,
        Some(MemberRole::Moderator)
    );

    Ok(())
}

/// Tests the unique (user, server) index surfaces as a unique violation.
///
/// Expected: Err(AppError::DbErr) whose sql_err is a unique constraint violation
#[tokio::test]
async fn rejects_duplicate_pair() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, server) = factory::helpers::create_server_with_owner(db).await?;
    let user = factory::create_user(db).await?;
    factory::create_membership(db, user.id, server.id).await?;

    let repo = MembershipRepository::new(db);
    let result = repo
        .create(CreateMembershipParams {
            user_id: user.id,
            server_id: server.id,
            role: MemberRole::Member,
        })
        .await;

    match result {
        Err(AppError::DbErr(err)) => assert!(matches!(
            err.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        )),
        other => panic!("expected unique violation, got {:?}", other),
    }
    assert_eq!(repo.count_by_server(server.id).await?, 2);

    Ok(())
}
