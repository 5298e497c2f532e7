mod handlers;

use axum::{routing::get, routing::post, Router};

use crate::core::state::AppState;

pub(crate) use handlers::activity;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::performance_overview))
        .route("/lookup", get(handlers::lookup))
        .route("/:student_id", get(handlers::dashboard))
        .route("/:student_id/progress", get(handlers::progress))
        .route("/:student_id/assignments", get(handlers::list_assignments))
        .route(
            "/:student_id/assignments/:assignment_id/complete",
            post(handlers::complete_assignment),
        )
        .route("/:student_id/assignments/:assignment_id/attempts", post(handlers::score_attempt))
}

#[cfg(test)]
mod tests;
