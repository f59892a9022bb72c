use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::pagination::{pagination_headers, PageParams};
use crate::error::ApiError;
use crate::schemas::tag::{TagCreate, TagPatch};
use crate::services::TagService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route(
            "/tags/:tag_id",
            get(get_tag).patch(update_tag).delete(delete_tag),
        )
        .route("/tags/:tag_id/content", get(list_tag_content))
        .route("/content/:content_id/tags", get(list_content_tags))
        .route(
            "/content/:content_id/tags/:tag_id",
            post(attach_tag).delete(detach_tag),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Substring match on tag name
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

async fn list_tags(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = TagService::new(state.pool.clone())
        .list(query.q.as_deref(), page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn create_tag(
    State(state): State<AppState>,
    Json(body): Json<TagCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let tag = TagService::new(state.pool.clone()).create(body).await?;
    let location = format!("/tags/{}", tag.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(tag)))
}

async fn get_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let tag = TagService::new(state.pool.clone()).get(tag_id).await?;
    Ok(Json(tag))
}

async fn update_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<Uuid>,
    Json(body): Json<TagPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let tag = TagService::new(state.pool.clone()).update(tag_id, body).await?;
    Ok(Json(tag))
}

async fn delete_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    TagService::new(state.pool.clone()).delete(tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----- content associations -----

async fn list_content_tags(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(content_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = TagService::new(state.pool.clone())
        .list_tags_for_content(content_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn list_tag_content(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(tag_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = TagService::new(state.pool.clone())
        .list_content_for_tag(tag_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn attach_tag(
    State(state): State<AppState>,
    Path((content_id, tag_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let link = TagService::new(state.pool.clone()).attach(content_id, tag_id).await?;
    let location = format!("/content/{}/tags/{}", content_id, tag_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(link)))
}

async fn detach_tag(
    State(state): State<AppState>,
    Path((content_id, tag_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    TagService::new(state.pool.clone()).detach(content_id, tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
