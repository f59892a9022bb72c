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
use crate::schemas::task::{TaskCreate, TaskPatch};
use crate::services::TaskService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/events/:event_id/tasks",
            get(list_event_tasks).post(create_event_task),
        )
        .route(
            "/tasks/:task_id",
            get(get_task).patch(update_task).delete(delete_task),
        )
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

async fn list_event_tasks(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(event_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = TaskService::new(state.pool.clone())
        .list_for_event(event_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn create_event_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(event_id): Path<Uuid>,
    Json(body): Json<TaskCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let task = TaskService::new(state.pool.clone())
        .create_under_event(event_id, user.id, body)
        .await?;
    let location = format!("/tasks/{}", task.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(task)))
}

async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let task = TaskService::new(state.pool.clone()).get(task_id).await?;
    Ok(Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<TaskPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let task = TaskService::new(state.pool.clone()).update(task_id, body).await?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    TaskService::new(state.pool.clone()).delete(task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
