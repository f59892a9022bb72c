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
use crate::schemas::program::{ProgramCreate, ProgramPatch};
use crate::services::ProgramService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/workspaces/:workspace_id/programs",
            get(list_workspace_programs).post(create_workspace_program),
        )
        .route(
            "/programs/:program_id",
            get(get_program).patch(update_program).delete(delete_program),
        )
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
}

async fn list_workspace_programs(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(workspace_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve()?;
    let (total, items) = ProgramService::new(state.pool.clone())
        .list_for_workspace(workspace_id, page.limit, page.offset)
        .await?;
    Ok((pagination_headers(&uri, total, page), Json(items)))
}

async fn create_workspace_program(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(workspace_id): Path<Uuid>,
    Json(body): Json<ProgramCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let program = ProgramService::new(state.pool.clone())
        .create_under_workspace(workspace_id, user.id, body)
        .await?;
    let location = format!("/programs/{}", program.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(program)))
}

async fn get_program(
    State(state): State<AppState>,
    Path(program_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let program = ProgramService::new(state.pool.clone()).get(program_id).await?;
    Ok(Json(program))
}

async fn update_program(
    State(state): State<AppState>,
    Path(program_id): Path<Uuid>,
    Json(body): Json<ProgramPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let program = ProgramService::new(state.pool.clone()).update(program_id, body).await?;
    Ok(Json(program))
}

async fn delete_program(
    State(state): State<AppState>,
    Path(program_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ProgramService::new(state.pool.clone()).delete(program_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
