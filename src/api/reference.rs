use axum::{extract::State, routing::get, Json, Router};

use crate::api::guards::CurrentViewer;
use crate::core::reference::{SchoolClass, Subject};
use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/subjects", get(subjects)).route("/classes", get(classes))
}

async fn subjects(
    CurrentViewer(_viewer): CurrentViewer,
    State(state): State<AppState>,
) -> Json<Vec<Subject>> {
    Json(state.reference().subjects().to_vec())
}

async fn classes(
    CurrentViewer(_viewer): CurrentViewer,
    State(state): State<AppState>,
) -> Json<Vec<SchoolClass>> {
    Json(state.reference().classes().to_vec())
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    use crate::test_support;

    #[tokio::test]
    async fn subjects_are_listed_for_any_caller() {
        let ctx = test_support::setup_test_context().await;

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::GET,
                "/api/v1/reference/subjects",
                Some(test_support::STUDENT_EMAIL),
                None,
            ))
            .await
            .expect("subjects");

        assert_eq!(response.status(), StatusCode::OK);
        let body = test_support::read_json(response).await;
        let ids: Vec<&str> =
            body.as_array().expect("array").iter().filter_map(|s| s["id"].as_str()).collect();
        assert_eq!(ids, vec!["math", "science", "english", "history", "biology"]);
    }

    #[tokio::test]
    async fn classes_require_identity() {
        let ctx = test_support::setup_test_context().await;

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(Method::GET, "/api/v1/reference/classes", None, None))
            .await
            .expect("classes");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
