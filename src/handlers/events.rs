use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::pagination::{pagination_headers, PageParams};
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::schemas::event::{EventCreate, EventPatch};
use crate::services::EventService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/workspaces/:workspace_id/events",
            get(list_workspace_events).post(create_workspace_event),
        )
        .route(
            "/workspaces/:workspace_id/programs/:program_id/events",
            get(list_program_events),
        )
        .route("/programs/:program_id/events", post(create_program_event))
        .route(
            "/events/:event_id",
            get(get_event).patch(update_event).delete(delete_event),
        )
}

#[derive(Debug, Deserialize)]
struct EventListQuery {
    /// Inclusive bounds on start_dt
    #[serde(default)]
    date_from: Option<DateTime<Utc>>,
    #[serde(default)]
    date_to: Option<DateTime<Utc>>,
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

async fn list_workspace_events(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(workspace_id): Path<Uuid>,
    Query(query): Query<EventListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = EventService::new(state.pool.clone())
        .list_for_workspace(workspace_id, query.date_from, query.date_to, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn list_program_events(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path((workspace_id, program_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<EventListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = EventService::new(state.pool.clone())
        .list_for_program(
            workspace_id,
            program_id,
            query.date_from,
            query.date_to,
            page.limit,
            page.offset,
        )
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn create_workspace_event(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(workspace_id): Path<Uuid>,
    Json(body): Json<EventCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let event = EventService::new(state.pool.clone())
        .create_under_workspace(workspace_id, user.id, body)
        .await?;
    let location = format!("/events/{}", event.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(event)))
}

async fn create_program_event(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(program_id): Path<Uuid>,
    Json(body): Json<EventCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let event = EventService::new(state.pool.clone())
        .create_under_program(program_id, user.id, body)
        .await?;
    let location = format!("/events/{}", event.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(event)))
}

async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = EventService::new(state.pool.clone()).get(event_id).await?;
    Ok(Json(event))
}

async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(body): Json<EventPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let event = EventService::new(state.pool.clone()).update(event_id, body).await?;
    Ok(Json(event))
}

async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    EventService::new(state.pool.clone()).delete(event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
