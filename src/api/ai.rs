use axum::extract::{Path, State};
use axum::{routing::post, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{enforce_ai_rate_limit, CurrentTeacher, CurrentViewer};
use crate::api::validation::validate_request;
use crate::core::state::AppState;
use crate::schemas::ai::{ClarifyRequest, ClarifyResponse, QueryRequest, SessionContentRequest};
use crate::services::ai_flows::{self, PerformanceInsights, SessionContent, StudentAnswer};
use crate::services::quiz;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/session-content", post(session_content))
        .route("/insights/:student_id", post(insights))
        .route("/clarify", post(clarify))
        .route("/query", post(query))
}

async fn session_content(
    CurrentTeacher(teacher): CurrentTeacher,
    State(state): State<AppState>,
    Json(payload): Json<SessionContentRequest>,
) -> Result<Json<SessionContent>, ApiError> {
    validate_request(&payload)?;
    enforce_ai_rate_limit(&state, &teacher).await?;

    let content = ai_flows::generate_session_content(state.generator(), payload.prompt.trim()).await?;
    Ok(Json(content))
}

async fn insights(
    Path(student_id): Path<String>,
    CurrentTeacher(teacher): CurrentTeacher,
    State(state): State<AppState>,
) -> Result<Json<PerformanceInsights>, ApiError> {
    let student = state
        .store()
        .find_student(&student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;
    enforce_ai_rate_limit(&state, &teacher).await?;

    let grades = state.store().list_grades(&student.id).await?;
    let insights =
        ai_flows::performance_insights(state.generator(), state.reference(), &student.name, &grades)
            .await?;
    Ok(Json(insights))
}

async fn clarify(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Json(payload): Json<ClarifyRequest>,
) -> Result<Json<ClarifyResponse>, ApiError> {
    validate_request(&payload)?;
    enforce_ai_rate_limit(&state, &viewer).await?;

    let clarification =
        ai_flows::clarify_concept(state.generator(), payload.concept.trim(), payload.subject.trim())
            .await?;
    let questions = quiz::parse_quiz(&clarification.quiz);

    Ok(Json(ClarifyResponse {
        explanation: clarification.explanation,
        quiz: clarification.quiz,
        questions,
    }))
}

async fn query(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<StudentAnswer>, ApiError> {
    validate_request(&payload)?;
    enforce_ai_rate_limit(&state, &viewer).await?;

    let answer = ai_flows::answer_student_query(
        state.generator(),
        payload.question.trim(),
        payload.subject.trim(),
    )
    .await?;
    Ok(Json(answer))
}
