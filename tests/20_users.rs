mod common;

use anyhow::Result;
use serde_json::json;

use scouthub_api::schemas::user::{UserCreate, UserPatch};
use scouthub_api::services::UserService;

#[tokio::test]
async fn create_assigns_fresh_ids() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let svc = UserService::new(pool);

    let first = svc
        .create(UserCreate {
            name: "Robin".to_string(),
            email: common::unique_email("robin"),
            auth0_id: common::unique("auth0|robin"),
            pronouns: None,
        })
        .await?;
    let second = svc
        .create(UserCreate {
            name: "Alex".to_string(),
            email: common::unique_email("alex"),
            auth0_id: common::unique("auth0|alex"),
            pronouns: Some("they/them".to_string()),
        })
        .await?;

    assert_ne!(first.id, second.id);
    assert_eq!(second.pronouns.as_deref(), Some("they/them"));
    Ok(())
}

#[tokio::test]
async fn duplicate_email_conflicts_case_insensitively() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let svc = UserService::new(pool);
    let email = common::unique_email("dup");

    svc.create(UserCreate {
        name: "First".to_string(),
        email: email.clone(),
        auth0_id: common::unique("auth0|first"),
        pronouns: None,
    })
    .await?;

    let err = svc
        .create(UserCreate {
            name: "Second".to_string(),
            email: email.to_uppercase(),
            auth0_id: common::unique("auth0|second"),
            pronouns: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);
    Ok(())
}

#[tokio::test]
async fn patch_changes_only_supplied_fields() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let svc = UserService::new(pool);

    let user = svc
        .create(UserCreate {
            name: "Before".to_string(),
            email: common::unique_email("patch"),
            auth0_id: common::unique("auth0|patch"),
            pronouns: Some("she/her".to_string()),
        })
        .await?;

    let patch: UserPatch = serde_json::from_value(json!({ "name": "After" }))?;
    let updated = svc.update(user.id, patch).await?;

    assert_eq!(updated.name, "After");
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.pronouns.as_deref(), Some("she/her"));

    // explicit null clears a nullable field
    let patch: UserPatch = serde_json::from_value(json!({ "pronouns": null }))?;
    let updated = svc.update(user.id, patch).await?;
    assert_eq!(updated.pronouns, None);
    Ok(())
}

#[tokio::test]
async fn missing_user_is_not_found() -> Result<()> {
    let Some(pool) = common::test_pool().await else {
        return Ok(());
    };
    let svc = UserService::new(pool);

    let err = svc.get(uuid::Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = svc.delete(uuid::Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    Ok(())
}
