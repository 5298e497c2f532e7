use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentTeacher, CurrentViewer};
use crate::core::state::AppState;
use crate::db::models::Student;
use crate::schemas::student::{
    ActivityResponse, AssignmentResponse, DashboardResponse, PerformanceRowResponse,
    ProgressPointResponse, QuizAttemptRequest, RollNumberQuery, StudentResponse,
};
use crate::services::dashboards::{self, AssignmentEntry};
use crate::services::grading;
use crate::services::quiz::{self, QuizAttempt};

async fn require_student(state: &AppState, student_id: &str) -> Result<Student, ApiError> {
    state
        .store()
        .find_student(student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))
}

pub(super) async fn performance_overview(
    CurrentTeacher(_teacher): CurrentTeacher,
    State(state): State<AppState>,
) -> Result<Json<Vec<PerformanceRowResponse>>, ApiError> {
    let rows = dashboards::performance_overview(state.store()).await?;
    Ok(Json(rows.into_iter().map(PerformanceRowResponse::from_row).collect()))
}

pub(super) async fn lookup(
    Query(params): Query<RollNumberQuery>,
    CurrentTeacher(_teacher): CurrentTeacher,
    State(state): State<AppState>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = grading::lookup_student_by_roll_number(state.store(), &params.roll_number)
        .await?
        .ok_or_else(|| ApiError::NotFound("No student with that roll number".to_string()))?;
    Ok(Json(StudentResponse::from_db(student)))
}

pub(super) async fn dashboard(
    Path(student_id): Path<String>,
    CurrentViewer(_viewer): CurrentViewer,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dashboard = dashboards::student_dashboard(state.store(), state.reference(), &student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;
    Ok(Json(DashboardResponse::from_dashboard(dashboard)))
}

pub(super) async fn progress(
    Path(student_id): Path<String>,
    CurrentViewer(_viewer): CurrentViewer,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProgressPointResponse>>, ApiError> {
    require_student(&state, &student_id).await?;
    let grades = state.store().list_grades(&student_id).await?;
    Ok(Json(
        dashboards::progress_series(&grades)
            .into_iter()
            .map(ProgressPointResponse::from_point)
            .collect(),
    ))
}

pub(super) async fn list_assignments(
    Path(student_id): Path<String>,
    CurrentViewer(_viewer): CurrentViewer,
    State(state): State<AppState>,
) -> Result<Json<Vec<AssignmentResponse>>, ApiError> {
    require_student(&state, &student_id).await?;
    let assignments = state.store().list_assignments(&student_id).await?;
    Ok(Json(
        assignments
            .into_iter()
            .map(|assignment| AssignmentResponse::from_entry(AssignmentEntry::new(assignment)))
            .collect(),
    ))
}

pub(super) async fn complete_assignment(
    Path((student_id, assignment_id)): Path<(String, String)>,
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let assignment =
        grading::complete_assignment(state.store(), &student_id, &assignment_id).await?;
    tracing::info!(
        student_id = %student_id,
        assignment_id = %assignment.id,
        viewer = %viewer.email,
        "Assignment completed"
    );
    Ok(Json(AssignmentResponse::from_entry(AssignmentEntry::new(assignment))))
}

pub(super) async fn score_attempt(
    Path((student_id, assignment_id)): Path<(String, String)>,
    CurrentViewer(_viewer): CurrentViewer,
    State(state): State<AppState>,
    Json(payload): Json<QuizAttemptRequest>,
) -> Result<Json<QuizAttempt>, ApiError> {
    let assignment = state
        .store()
        .find_assignment(&student_id, &assignment_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Assignment not found".to_string()))?;

    let questions = quiz::parse_quiz(&assignment.quiz);
    Ok(Json(quiz::score_answers(&questions, &payload.answers)))
}

pub(crate) async fn activity(
    CurrentTeacher(_teacher): CurrentTeacher,
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let feed = dashboards::activity_feed(state.store()).await?;
    Ok(Json(feed.into_iter().map(ActivityResponse::from_entry).collect()))
}
