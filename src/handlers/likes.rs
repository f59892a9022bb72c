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
use crate::services::LikeService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/content/:content_id/likes",
            get(list_content_likes).post(like_content),
        )
        .route("/content/:content_id/likes/:user_id", axum::routing::delete(unlike_content))
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

async fn list_content_likes(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(content_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = LikeService::new(state.pool.clone())
        .list_for_content(content_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

/// Likes are always recorded for the authenticated user
async fn like_content(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(content_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let like = LikeService::new(state.pool.clone()).like(user.id, content_id).await?;
    let location = format!("/content/{}/likes/{}", content_id, like.user_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(like)))
}

async fn unlike_content(
    State(state): State<AppState>,
    Path((content_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    LikeService::new(state.pool.clone()).unlike(user_id, content_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
