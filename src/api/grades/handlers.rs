use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentTeacher;
use crate::core::state::AppState;
use crate::schemas::grade::GradeEntryResponse;
use crate::schemas::student::MatrixRowResponse;
use crate::services::dashboards;
use crate::services::grading::{self, GradeSubmission};

pub(super) async fn submit_grade(
    CurrentTeacher(teacher): CurrentTeacher,
    State(state): State<AppState>,
    Json(payload): Json<GradeSubmission>,
) -> Result<(StatusCode, Json<GradeEntryResponse>), ApiError> {
    let outcome =
        grading::submit_grade(state.store(), state.generator(), state.reference(), payload).await?;

    tracing::info!(
        teacher = %teacher.email,
        student_id = %outcome.student.id,
        grade_id = %outcome.grade.id,
        "Grade recorded"
    );

    Ok((StatusCode::CREATED, Json(GradeEntryResponse::from_outcome(outcome, state.reference()))))
}

pub(super) async fn matrix(
    CurrentTeacher(_teacher): CurrentTeacher,
    State(state): State<AppState>,
) -> Result<Json<Vec<MatrixRowResponse>>, ApiError> {
    let rows = dashboards::grade_matrix(state.store(), state.reference()).await?;
    Ok(Json(rows.into_iter().map(MatrixRowResponse::from_row).collect()))
}
