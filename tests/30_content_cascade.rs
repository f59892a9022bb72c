mod common;

use anyhow::Result;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use scouthub_api::database::models::{User, Workspace};
use scouthub_api::schemas::user::UserCreate;
use scouthub_api::services::{
    CommentService, EventService, LikeService, ProgramService, TagService, TaskService,
    TroopService, UserService, WorkspaceService,
};

async fn seed_user_and_workspace(pool: &PgPool) -> Result<(User, Workspace)> {
    let user = UserService::new(pool.clone())
        .create(UserCreate {
            name: "Organizer".to_string(),
            email: common::unique_email("organizer"),
            auth0_id: common::unique("auth0|organizer"),
            pronouns: None,
        })
        .await?;
    let workspace = WorkspaceService::new(pool.clone())
        .create_for_user(user.id, serde_json::from_value(json!({ "name": "Den 7" }))?)
        .await?;
    Ok((user, workspace))
}

#[tokio::test]
async fn subtype_create_builds_base_and_child_rows() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let (user, workspace) = seed_user_and_workspace(&pool).await?;

    let program = ProgramService::new(pool.clone())
        .create_under_workspace(
            workspace.id,
            user.id,
            serde_json::from_value(json!({ "name": "Fall Program", "public": true }))?,
        )
        .await?;
    assert_eq!(program.workspace_id, workspace.id);
    assert_eq!(program.author_id, user.id);
    assert_eq!(program.like_count, 0);

    // the base row is visible to content-scoped features immediately
    let (total, _) = CommentService::new(pool.clone())
        .list_for_content(program.id, 50, 0)
        .await?;
    assert_eq!(total, 0);
    Ok(())
}

#[tokio::test]
async fn event_create_under_program_inherits_workspace() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let (user, workspace) = seed_user_and_workspace(&pool).await?;

    let program = ProgramService::new(pool.clone())
        .create_under_workspace(
            workspace.id,
            user.id,
            serde_json::from_value(json!({ "name": "Spring Program" }))?,
        )
        .await?;
    let event = EventService::new(pool.clone())
        .create_under_program(
            program.id,
            user.id,
            serde_json::from_value(json!({
                "name": "Kickoff",
                "start_dt": "2026-09-07T20:00:00Z"
            }))?,
        )
        .await?;

    assert_eq!(event.workspace_id, workspace.id);
    assert_eq!(event.program_id, Some(program.id));
    Ok(())
}

#[tokio::test]
async fn deleting_an_event_removes_all_dependents() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let (user, workspace) = seed_user_and_workspace(&pool).await?;

    let event = EventService::new(pool.clone())
        .create_under_workspace(
            workspace.id,
            user.id,
            serde_json::from_value(json!({
                "name": "Campout",
                "start_dt": "2026-10-02T18:00:00Z"
            }))?,
        )
        .await?;

    let task = TaskService::new(pool.clone())
        .create_under_event(
            event.id,
            user.id,
            serde_json::from_value(json!({ "name": "Bring firewood" }))?,
        )
        .await?;
    let comment = CommentService::new(pool.clone())
        .create_under_content(
            event.id,
            user.id,
            serde_json::from_value(json!({ "body": "Can't wait!" }))?,
        )
        .await?;
    let tag = TagService::new(pool.clone())
        .create(serde_json::from_value(json!({ "name": common::unique("outdoors") }))?)
        .await?;
    TagService::new(pool.clone()).attach(event.id, tag.id).await?;
    LikeService::new(pool.clone()).like(user.id, event.id).await?;
    let troop = TroopService::new(pool.clone())
        .create_under_workspace(
            workspace.id,
            serde_json::from_value(json!({ "name": common::unique("Troop") }))?,
        )
        .await?;
    TroopService::new(pool.clone()).add_participation(troop.id, event.id).await?;

    EventService::new(pool.clone()).delete(event.id).await?;

    // base row, subtype row, and every dependent are gone
    assert_eq!(
        EventService::new(pool.clone()).get(event.id).await.unwrap_err().status_code(),
        404
    );
    assert_eq!(
        TaskService::new(pool.clone()).get(task.id).await.unwrap_err().status_code(),
        404
    );
    assert_eq!(
        CommentService::new(pool.clone()).get(comment.id).await.unwrap_err().status_code(),
        404
    );
    let (tags_total, _) =
        TagService::new(pool.clone()).list_tags_for_content(event.id, 50, 0).await?;
    assert_eq!(tags_total, 0);
    let (likes_total, _) =
        LikeService::new(pool.clone()).list_for_content(event.id, 50, 0).await?;
    assert_eq!(likes_total, 0);
    let (events_total, _) =
        TroopService::new(pool.clone()).list_events_for_troop(troop.id, 50, 0).await?;
    assert_eq!(events_total, 0);

    // the tag itself survives, only the link is removed
    assert_eq!(TagService::new(pool.clone()).get(tag.id).await?.id, tag.id);
    Ok(())
}

#[tokio::test]
async fn deleting_a_program_detaches_its_events() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let (user, workspace) = seed_user_and_workspace(&pool).await?;

    let program = ProgramService::new(pool.clone())
        .create_under_workspace(
            workspace.id,
            user.id,
            serde_json::from_value(json!({ "name": "Winter Program" }))?,
        )
        .await?;
    let event = EventService::new(pool.clone())
        .create_under_program(
            program.id,
            user.id,
            serde_json::from_value(json!({
                "name": "Snow hike",
                "start_dt": "2027-01-09T10:00:00Z"
            }))?,
        )
        .await?;

    ProgramService::new(pool.clone()).delete(program.id).await?;

    assert_eq!(
        ProgramService::new(pool.clone()).get(program.id).await.unwrap_err().status_code(),
        404
    );
    let event = EventService::new(pool.clone()).get(event.id).await?;
    assert_eq!(event.program_id, None);
    Ok(())
}

#[tokio::test]
async fn like_count_can_never_go_negative() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let (user, workspace) = seed_user_and_workspace(&pool).await?;
    let programs = ProgramService::new(pool.clone());

    let err = programs
        .create_under_workspace(
            workspace.id,
            user.id,
            serde_json::from_value(json!({ "name": "Bad", "like_count": -1 }))?,
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let program = programs
        .create_under_workspace(
            workspace.id,
            user.id,
            serde_json::from_value(json!({ "name": "Good", "like_count": 2 }))?,
        )
        .await?;
    let err = programs
        .update(program.id, serde_json::from_value(json!({ "like_count": -3 }))?)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    // untouched by the failed patch
    assert_eq!(programs.get(program.id).await?.like_count, 2);
    Ok(())
}

#[tokio::test]
async fn event_patch_enforces_program_workspace_tenancy() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let (user, workspace) = seed_user_and_workspace(&pool).await?;
    let (_, other_workspace) = seed_user_and_workspace(&pool).await?;

    let foreign_program = ProgramService::new(pool.clone())
        .create_under_workspace(
            other_workspace.id,
            user.id,
            serde_json::from_value(json!({ "name": "Elsewhere" }))?,
        )
        .await?;
    let event = EventService::new(pool.clone())
        .create_under_workspace(
            workspace.id,
            user.id,
            serde_json::from_value(json!({
                "name": "Meeting",
                "start_dt": "2026-11-02T20:00:00Z"
            }))?,
        )
        .await?;

    let err = EventService::new(pool.clone())
        .update(
            event.id,
            serde_json::from_value(json!({ "program_id": foreign_program.id }))?,
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = EventService::new(pool.clone())
        .update(
            event.id,
            serde_json::from_value(json!({ "program_id": Uuid::new_v4() }))?,
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    Ok(())
}
