use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::pagination::{pagination_headers, PageParams};
use crate::error::ApiError;
use crate::schemas::membership::{MembershipCreate, MembershipPatch};
use crate::schemas::workspace::{WorkspaceCreate, WorkspacePatch};
use crate::services::WorkspaceService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/workspaces", get(list_workspaces).post(create_workspace))
        .route(
            "/workspaces/:workspace_id",
            get(get_workspace).patch(update_workspace).delete(delete_workspace),
        )
        .route(
            "/workspaces/:workspace_id/memberships",
            get(list_members).post(add_member),
        )
        .route(
            "/workspaces/:workspace_id/memberships/:user_id",
            axum::routing::patch(update_member).delete(remove_member),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Workspaces are always listed for a member
    user_id: Uuid,
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct CreateQuery {
    user_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

async fn list_workspaces(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = WorkspaceService::new(state.pool.clone())
        .list_for_user(query.user_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn create_workspace(
    State(state): State<AppState>,
    Query(query): Query<CreateQuery>,
    Json(body): Json<WorkspaceCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = WorkspaceService::new(state.pool.clone())
        .create_for_user(query.user_id, body)
        .await?;
    let location = format!("/workspaces/{}", workspace.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(workspace)))
}

async fn get_workspace(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = WorkspaceService::new(state.pool.clone()).get(workspace_id).await?;
    Ok(Json(workspace))
}

async fn update_workspace(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
    Json(body): Json<WorkspacePatch>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = WorkspaceService::new(state.pool.clone())
        .update(workspace_id, body)
        .await?;
    Ok(Json(workspace))
}

async fn delete_workspace(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    WorkspaceService::new(state.pool.clone()).delete(workspace_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----- memberships -----

async fn list_members(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(workspace_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = WorkspaceService::new(state.pool.clone())
        .list_members(workspace_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn add_member(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
    Json(body): Json<MembershipCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let membership = WorkspaceService::new(state.pool.clone())
        .add_member(workspace_id, body)
        .await?;
    let location = format!("/workspaces/{}/memberships/{}", workspace_id, membership.user_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(membership)))
}

async fn update_member(
    State(state): State<AppState>,
    Path((workspace_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<MembershipPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let membership = WorkspaceService::new(state.pool.clone())
        .update_member(workspace_id, user_id, body)
        .await?;
    Ok(Json(membership))
}

async fn remove_member(
    State(state): State<AppState>,
    Path((workspace_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    WorkspaceService::new(state.pool.clone())
        .remove_member(workspace_id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
