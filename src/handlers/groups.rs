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
use crate::schemas::group::{GroupCreate, GroupPatch};
use crate::schemas::membership::{MembershipCreate, MembershipPatch};
use crate::services::GroupService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route(
            "/groups/:group_id",
            get(get_group).patch(update_group).delete(delete_group),
        )
        .route(
            "/groups/:group_id/memberships",
            get(list_members).post(add_member),
        )
        .route(
            "/groups/:group_id/memberships/:user_id",
            axum::routing::patch(update_member).delete(remove_member),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Substring match on group name
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

async fn list_groups(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = GroupService::new(state.pool.clone())
        .list(query.q.as_deref(), page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn create_group(
    State(state): State<AppState>,
    Json(body): Json<GroupCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let group = GroupService::new(state.pool.clone()).create(body).await?;
    let location = format!("/groups/{}", group.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(group)))
}

async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let group = GroupService::new(state.pool.clone()).get(group_id).await?;
    Ok(Json(group))
}

async fn update_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(body): Json<GroupPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let group = GroupService::new(state.pool.clone()).update(group_id, body).await?;
    Ok(Json(group))
}

async fn delete_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    GroupService::new(state.pool.clone()).delete(group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----- memberships -----

async fn list_members(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(group_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = GroupService::new(state.pool.clone())
        .list_members(group_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn add_member(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(body): Json<MembershipCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let membership = GroupService::new(state.pool.clone()).add_member(group_id, body).await?;
    let location = format!("/groups/{}/memberships/{}", group_id, membership.user_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(membership)))
}

async fn update_member(
    State(state): State<AppState>,
    Path((group_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<MembershipPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let membership = GroupService::new(state.pool.clone())
        .update_member(group_id, user_id, body)
        .await?;
    Ok(Json(membership))
}

async fn remove_member(
    State(state): State<AppState>,
    Path((group_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    GroupService::new(state.pool.clone()).remove_member(group_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
