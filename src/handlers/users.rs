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
use crate::schemas::user::{UserCreate, UserPatch};
use crate::services::UserService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Substring match on name/email/auth0_id
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

async fn list_users(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = UserService::new(state.pool.clone())
        .list(query.q.as_deref(), page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserService::new(state.pool.clone()).create(body).await?;
    let location = format!("/users/{}", user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserService::new(state.pool.clone()).get(user_id).await?;
    Ok(Json(user))
}

async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UserPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserService::new(state.pool.clone()).update(user_id, body).await?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    UserService::new(state.pool.clone()).delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
