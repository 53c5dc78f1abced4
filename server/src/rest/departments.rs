use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use axum_extra::extract::WithRejection;
use entity::departments::Model;
use platform_api::{ApiError, ApiResult};
use platform_db::departments::{self, DepartmentInput};
use tracing::info;

use crate::http::AppState;

type Id = WithRejection<Path<i32>, ApiError>;
type Body = WithRejection<Json<DepartmentInput>, ApiError>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/department",
            get(list).post(create).put(missing_id).delete(missing_id),
        )
        .route(
            "/department/{id}",
            get(get_one).put(update).delete(delete_one),
        )
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Model>>> {
    let records = departments::list(&state.pool).await?;
    info!(count = records.len(), "departments listed");
    Ok(Json(records))
}

async fn get_one(
    State(state): State<AppState>,
    WithRejection(Path(id), _): Id,
) -> ApiResult<Json<Model>> {
    let record = departments::get(&state.pool, id).await?;
    info!(id, "department fetched");
    Ok(Json(record))
}

async fn create(
    State(state): State<AppState>,
    WithRejection(Json(input), _): Body,
) -> ApiResult<(StatusCode, Json<Model>)> {
    let record = departments::create(&state.pool, input).await?;
    info!(id = record.id, "department created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update(
    State(state): State<AppState>,
    WithRejection(Path(id), _): Id,
    WithRejection(Json(input), _): Body,
) -> ApiResult<Json<Model>> {
    let record = departments::update(&state.pool, id, input).await?;
    info!(id, "department updated");
    Ok(Json(record))
}

async fn delete_one(
    State(state): State<AppState>,
    WithRejection(Path(id), _): Id,
) -> ApiResult<StatusCode> {
    departments::delete(&state.pool, id).await?;
    info!(id, "department deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn missing_id() -> ApiError {
    ApiError::bad_request("missing id")
}
