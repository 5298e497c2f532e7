use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{routing::get, routing::patch, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentTeacher;
use crate::core::state::AppState;
use crate::schemas::content::{ContentResponse, ContentStatusUpdate};
use crate::services::content::{self, ContentDraft};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contents).post(create_content))
        .route("/:content_id/status", patch(update_status))
}

async fn list_contents(
    CurrentTeacher(_teacher): CurrentTeacher,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    let contents = state.store().list_contents().await?;
    Ok(Json(contents.into_iter().map(ContentResponse::from_db).collect()))
}

async fn create_content(
    CurrentTeacher(_teacher): CurrentTeacher,
    State(state): State<AppState>,
    Json(payload): Json<ContentDraft>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    let content = content::save_content(state.store(), state.reference(), payload).await?;
    Ok((StatusCode::CREATED, Json(ContentResponse::from_db(content))))
}

async fn update_status(
    Path(content_id): Path<String>,
    CurrentTeacher(_teacher): CurrentTeacher,
    State(state): State<AppState>,
    Json(payload): Json<ContentStatusUpdate>,
) -> Result<Json<ContentResponse>, ApiError> {
    let content = content::update_content_status(state.store(), &content_id, payload.status).await?;
    Ok(Json(ContentResponse::from_db(content)))
}
