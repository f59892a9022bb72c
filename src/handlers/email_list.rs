use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::pagination::{pagination_headers, PageParams};
use crate::error::ApiError;
use crate::schemas::email_list::EmailSubscribe;
use crate::services::EmailListService;
use crate::AppState;

/// Subscribing is open to the world; it backs the public signup form
pub fn public_router() -> Router<AppState> {
    Router::new().route("/email-list", post(subscribe))
}

/// Reading and pruning the list requires auth
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/email-list", get(list_entries))
        .route("/email-list/:email", axum::routing::delete(unsubscribe))
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

async fn list_entries(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) =
        EmailListService::new(state.pool.clone()).list(page.limit, page.offset).await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<EmailSubscribe>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = EmailListService::new(state.pool.clone()).subscribe(body).await?;
    let location = format!("/email-list/{}", entry.email);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(entry)))
}

async fn unsubscribe(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    EmailListService::new(state.pool.clone()).unsubscribe(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}
