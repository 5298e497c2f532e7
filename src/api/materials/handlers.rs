use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentTeacher, CurrentViewer};
use crate::core::state::AppState;
use crate::schemas::content::MaterialResponse;
use crate::services::materials::{self, MaterialDraft};

pub(super) async fn list_materials(
    Path((class_id, subject_id)): Path<(String, String)>,
    CurrentViewer(_viewer): CurrentViewer,
    State(state): State<AppState>,
) -> Result<Json<Vec<MaterialResponse>>, ApiError> {
    let items =
        materials::list_materials(state.store(), state.reference(), &class_id, &subject_id).await?;
    Ok(Json(items.into_iter().map(MaterialResponse::from_db).collect()))
}

pub(super) async fn register_material(
    Path((class_id, subject_id)): Path<(String, String)>,
    CurrentTeacher(teacher): CurrentTeacher,
    State(state): State<AppState>,
    Json(payload): Json<MaterialDraft>,
) -> Result<(StatusCode, Json<MaterialResponse>), ApiError> {
    let material = materials::register_material(
        state.store(),
        state.reference(),
        &class_id,
        &subject_id,
        payload,
    )
    .await?;
    tracing::debug!(teacher = %teacher.email, material_id = %material.id, "Material added");
    Ok((StatusCode::CREATED, Json(MaterialResponse::from_db(material))))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::test_support;

    #[tokio::test]
    async fn teacher_registers_and_anyone_lists() {
        let ctx = test_support::setup_test_context().await;

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/v1/materials/grade-5/math",
                Some(test_support::TEACHER_EMAIL),
                Some(json!({
                    "name": "Fractions worksheet",
                    "url": "https://files.school.test/fractions.pdf",
                    "type": "application/pdf"
                })),
            ))
            .await
            .expect("register");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::GET,
                "/api/v1/materials/grade-5/math",
                Some(test_support::STUDENT_EMAIL),
                None,
            ))
            .await
            .expect("list");
        assert_eq!(response.status(), StatusCode::OK);
        let body = test_support::read_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["type"], "application/pdf");
        assert_eq!(body[0]["name"], "Fractions worksheet");
    }

    #[tokio::test]
    async fn students_cannot_register_materials() {
        let ctx = test_support::setup_test_context().await;

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/v1/materials/grade-5/math",
                Some(test_support::STUDENT_EMAIL),
                Some(json!({ "name": "Notes", "url": "https://files.school.test/n.pdf" })),
            ))
            .await
            .expect("register");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(ctx.store.snapshot().materials.is_empty());
    }

    #[tokio::test]
    async fn unknown_subject_is_rejected() {
        let ctx = test_support::setup_test_context().await;

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::GET,
                "/api/v1/materials/grade-5/latin",
                Some(test_support::STUDENT_EMAIL),
                None,
            ))
            .await
            .expect("list");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
