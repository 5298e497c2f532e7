use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::core::{reference::ReferenceData, time::primitive_now_utc};
use crate::db::models::Material;
use crate::repositories::{
    materials::CreateMaterial,
    store::{Store, StoreError},
};

/// A file already uploaded elsewhere, registered here by URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub(crate) struct MaterialDraft {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub(crate) name: String,
    #[validate(url(message = "url must be a valid URL"))]
    pub(crate) url: String,
    #[serde(default, rename = "type")]
    #[validate(length(max = 64, message = "type must be at most 64 characters"))]
    pub(crate) kind: Option<String>,
}

#[derive(Debug, Error)]
pub(crate) enum MaterialsError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn check_scope(
    reference: &ReferenceData,
    class_id: &str,
    subject_id: &str,
) -> Result<(), MaterialsError> {
    if reference.class(class_id).is_none() {
        return Err(MaterialsError::Validation(format!("class_id: unknown class '{class_id}'")));
    }
    if reference.subject(subject_id).is_none() {
        return Err(MaterialsError::Validation(format!(
            "subject_id: unknown subject '{subject_id}'"
        )));
    }
    Ok(())
}

pub(crate) async fn register_material(
    store: &dyn Store,
    reference: &ReferenceData,
    class_id: &str,
    subject_id: &str,
    draft: MaterialDraft,
) -> Result<Material, MaterialsError> {
    check_scope(reference, class_id, subject_id)?;
    draft.validate().map_err(|err| MaterialsError::Validation(err.to_string()))?;

    let kind = draft
        .kind
        .as_deref()
        .map(str::trim)
        .filter(|kind| !kind.is_empty())
        .unwrap_or("application/octet-stream");

    let id = Uuid::new_v4().to_string();
    let material = store
        .create_material(CreateMaterial {
            id: &id,
            class_id,
            subject_id,
            name: draft.name.trim(),
            url: &draft.url,
            kind,
            uploaded_at: primitive_now_utc(),
        })
        .await?;

    tracing::info!(material_id = %material.id, class_id, subject_id, "Material registered");
    Ok(material)
}

pub(crate) async fn list_materials(
    store: &dyn Store,
    reference: &ReferenceData,
    class_id: &str,
    subject_id: &str,
) -> Result<Vec<Material>, MaterialsError> {
    check_scope(reference, class_id, subject_id)?;
    Ok(store.list_materials(class_id, subject_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::{default_classes, default_subjects};
    use crate::test_support::MemoryStore;

    fn reference() -> ReferenceData {
        ReferenceData::new(default_subjects(), default_classes(), vec![], vec![], vec!["improve".into()])
    }

    fn draft(url: &str) -> MaterialDraft {
        MaterialDraft { name: "Worksheet.pdf".to_string(), url: url.to_string(), kind: None }
    }

    #[tokio::test]
    async fn registered_material_is_listed_for_its_class_and_subject() {
        let store = MemoryStore::new();
        let material = register_material(
            &store,
            &reference(),
            "grade-5",
            "math",
            draft("https://files.example.com/worksheet.pdf"),
        )
        .await
        .expect("register");
        assert_eq!(material.kind, "application/octet-stream");

        let listed = list_materials(&store, &reference(), "grade-5", "math").await.expect("list");
        assert_eq!(listed.len(), 1);
        assert!(list_materials(&store, &reference(), "grade-6", "math").await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn invalid_url_and_unknown_scope_are_rejected() {
        let store = MemoryStore::new();
        let err = register_material(&store, &reference(), "grade-5", "math", draft("not a url"))
            .await
            .expect_err("url");
        assert!(matches!(err, MaterialsError::Validation(ref m) if m.contains("url")));

        let err = list_materials(&store, &reference(), "grade-5", "latin").await.expect_err("subject");
        assert!(matches!(err, MaterialsError::Validation(ref m) if m.contains("subject_id")));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn overlong_type_is_rejected_before_any_write() {
        let store = MemoryStore::new();
        let mut material = draft("https://files.example.com/worksheet.pdf");
        material.kind = Some("a".repeat(65));

        let err = register_material(&store, &reference(), "grade-5", "math", material)
            .await
            .expect_err("type too long");

        assert!(matches!(err, MaterialsError::Validation(ref m) if m.contains("type")));
        assert_eq!(store.call_count(), 0);
    }
}
