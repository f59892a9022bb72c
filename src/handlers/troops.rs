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
use crate::schemas::troop::{TroopCreate, TroopPatch};
use crate::services::TroopService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/workspaces/:workspace_id/troops",
            get(list_workspace_troops).post(create_workspace_troop),
        )
        .route(
            "/troops/:troop_id",
            get(get_troop).patch(update_troop).delete(delete_troop),
        )
        .route("/events/:event_id/troops", get(list_event_troops))
        .route("/troops/:troop_id/events", get(list_troop_events))
        .route(
            "/troops/:troop_id/events/:event_id",
            post(add_participation).delete(remove_participation),
        )
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

async fn list_workspace_troops(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(workspace_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = TroopService::new(state.pool.clone())
        .list_for_workspace(workspace_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn create_workspace_troop(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
    Json(body): Json<TroopCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let troop = TroopService::new(state.pool.clone())
        .create_under_workspace(workspace_id, body)
        .await?;
    let location = format!("/troops/{}", troop.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(troop)))
}

async fn get_troop(
    State(state): State<AppState>,
    Path(troop_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let troop = TroopService::new(state.pool.clone()).get(troop_id).await?;
    Ok(Json(troop))
}

async fn update_troop(
    State(state): State<AppState>,
    Path(troop_id): Path<Uuid>,
    Json(body): Json<TroopPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let troop = TroopService::new(state.pool.clone()).update(troop_id, body).await?;
    Ok(Json(troop))
}

async fn delete_troop(
    State(state): State<AppState>,
    Path(troop_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    TroopService::new(state.pool.clone()).delete(troop_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----- participations -----

async fn list_event_troops(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(event_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = TroopService::new(state.pool.clone())
        .list_troops_for_event(event_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn list_troop_events(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(troop_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = TroopService::new(state.pool.clone())
        .list_events_for_troop(troop_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn add_participation(
    State(state): State<AppState>,
    Path((troop_id, event_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let participation = TroopService::new(state.pool.clone())
        .add_participation(troop_id, event_id)
        .await?;
    let location = format!("/troops/{}/events/{}", troop_id, event_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(participation)))
}

async fn remove_participation(
    State(state): State<AppState>,
    Path((troop_id, event_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    TroopService::new(state.pool.clone())
        .remove_participation(troop_id, event_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
