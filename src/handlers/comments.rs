use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::pagination::{pagination_headers, PageParams};
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::schemas::comment::{CommentCreate, CommentPatch};
use crate::services::CommentService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/content/:content_id/comments",
            get(list_content_comments).post(create_comment),
        )
        .route(
            "/comments/:comment_id",
            get(get_comment).patch(update_comment).delete(delete_comment),
        )
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

async fn list_content_comments(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(content_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = CommentService::new(state.pool.clone())
        .list_for_content(content_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn create_comment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(content_id): Path<Uuid>,
    Json(body): Json<CommentCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = CommentService::new(state.pool.clone())
        .create_under_content(content_id, user.id, body)
        .await?;
    let location = format!("/comments/{}", comment.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(comment)))
}

async fn get_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = CommentService::new(state.pool.clone()).get(comment_id).await?;
    Ok(Json(comment))
}

async fn update_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Json(body): Json<CommentPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = CommentService::new(state.pool.clone()).update(comment_id, body).await?;
    Ok(Json(comment))
}

async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    CommentService::new(state.pool.clone()).delete(comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
