use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::core::bootstrap::{self, SeedOutcome};
use crate::core::state::AppState;

#[derive(Debug, Serialize)]
struct SeedResponse {
    seeded: bool,
    students: usize,
    grades: usize,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/seed", post(seed))
}

async fn seed(
    CurrentAdmin(admin): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<SeedResponse>, ApiError> {
    let outcome = bootstrap::seed_demo_data(state.store()).await?;
    tracing::info!(admin = %admin.email, outcome = ?outcome, "Demo seed requested");

    let response = match outcome {
        SeedOutcome::Seeded { students, grades } => SeedResponse { seeded: true, students, grades },
        SeedOutcome::Skipped => SeedResponse { seeded: false, students: 0, grades: 0 },
    };
    Ok(Json(response))
}
