mod handlers;

use axum::{routing::get, Router};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route(
        "/:class_id/:subject_id",
        get(handlers::list_materials).post(handlers::register_material),
    )
}
