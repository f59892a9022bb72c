mod common;

use anyhow::Result;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use scouthub_api::database::models::{User, Workspace};
use scouthub_api::schemas::user::UserCreate;
use scouthub_api::services::{EventService, TroopService, UserService, WorkspaceService};

async fn seed_user_and_workspace(pool: &PgPool) -> Result<(User, Workspace)> {
    let user = UserService::new(pool.clone())
        .create(UserCreate {
            name: "Leader".to_string(),
            email: common::unique_email("leader"),
            auth0_id: common::unique("auth0|leader"),
            pronouns: None,
        })
        .await?;
    let workspace = WorkspaceService::new(pool.clone())
        .create_for_user(user.id, serde_json::from_value(json!({ "name": "Pack 12" }))?)
        .await?;
    Ok((user, workspace))
}

#[tokio::test]
async fn duplicate_participation_conflicts_and_missing_one_is_not_found() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let (user, workspace) = seed_user_and_workspace(&pool).await?;
    let troops = TroopService::new(pool.clone());

    let troop = troops
        .create_under_workspace(
            workspace.id,
            serde_json::from_value(json!({ "name": common::unique("Eagles") }))?,
        )
        .await?;
    let event = EventService::new(pool.clone())
        .create_under_workspace(
            workspace.id,
            user.id,
            serde_json::from_value(json!({
                "name": "Jamboree",
                "start_dt": "2026-08-15T09:00:00Z"
            }))?,
        )
        .await?;

    troops.add_participation(troop.id, event.id).await?;
    let err = troops.add_participation(troop.id, event.id).await.unwrap_err();
    assert_eq!(err.status_code(), 409);

    troops.remove_participation(troop.id, event.id).await?;
    let err = troops.remove_participation(troop.id, event.id).await.unwrap_err();
    assert_eq!(err.status_code(), 404);

    // participation against entities that don't exist
    let err = troops.add_participation(troop.id, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    let err = troops.add_participation(Uuid::new_v4(), event.id).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    Ok(())
}

#[tokio::test]
async fn workspace_troops_list_is_name_ordered_and_windowed() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let (_, workspace) = seed_user_and_workspace(&pool).await?;
    let troops = TroopService::new(pool.clone());

    for name in ["Bravo", "Alpha", "Charlie"] {
        troops
            .create_under_workspace(
                workspace.id,
                serde_json::from_value(json!({ "name": name }))?,
            )
            .await?;
    }

    let (total, page) = troops.list_for_workspace(workspace.id, 2, 0).await?;
    assert_eq!(total, 3);
    assert_eq!(
        page.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["Alpha", "Bravo"]
    );

    let (_, rest) = troops.list_for_workspace(workspace.id, 2, 2).await?;
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].name, "Charlie");
    Ok(())
}

#[tokio::test]
async fn event_listings_filter_by_date_window() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let (user, workspace) = seed_user_and_workspace(&pool).await?;
    let events = EventService::new(pool.clone());

    for (name, start) in [
        ("September meeting", "2026-09-07T20:00:00Z"),
        ("October meeting", "2026-10-05T20:00:00Z"),
        ("November meeting", "2026-11-02T20:00:00Z"),
    ] {
        events
            .create_under_workspace(
                workspace.id,
                user.id,
                serde_json::from_value(json!({ "name": name, "start_dt": start }))?,
            )
            .await?;
    }

    let (total, items) = events
        .list_for_workspace(
            workspace.id,
            Some("2026-09-20T00:00:00Z".parse()?),
            Some("2026-10-20T00:00:00Z".parse()?),
            50,
            0,
        )
        .await?;
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "October meeting");

    // unbounded listing comes back in start order
    let (_, all) = events.list_for_workspace(workspace.id, None, None, 50, 0).await?;
    assert_eq!(
        all.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        vec!["September meeting", "October meeting", "November meeting"]
    );
    Ok(())
}

#[tokio::test]
async fn workspace_delete_cascades_through_troops() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let (user, workspace) = seed_user_and_workspace(&pool).await?;
    let troops = TroopService::new(pool.clone());

    let troop = troops
        .create_under_workspace(
            workspace.id,
            serde_json::from_value(json!({ "name": common::unique("Owls") }))?,
        )
        .await?;
    let event = EventService::new(pool.clone())
        .create_under_workspace(
            workspace.id,
            user.id,
            serde_json::from_value(json!({
                "name": "Farewell",
                "start_dt": "2026-12-01T18:00:00Z"
            }))?,
        )
        .await?;

    WorkspaceService::new(pool.clone()).delete(workspace.id).await?;

    assert_eq!(troops.get(troop.id).await.unwrap_err().status_code(), 404);
    assert_eq!(
        EventService::new(pool.clone()).get(event.id).await.unwrap_err().status_code(),
        404
    );
    Ok(())
}
