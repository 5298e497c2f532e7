use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::core::{reference::ReferenceData, time::primitive_now_utc};
use crate::db::models::Content;
use crate::db::types::{ContentStatus, TransitionError};
use crate::repositories::{
    contents::CreateContent,
    store::{Store, StoreError},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub(crate) struct ContentDraft {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub(crate) title: String,
    #[validate(length(min = 1, message = "body_html must not be empty"))]
    pub(crate) body_html: String,
    pub(crate) class_id: String,
    pub(crate) subject_id: String,
}

#[derive(Debug, Error)]
pub(crate) enum ContentError {
    #[error("{0}")]
    Validation(String),
    #[error("Content not found")]
    NotFound,
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stores generated lesson content for review.
pub(crate) async fn save_content(
    store: &dyn Store,
    reference: &ReferenceData,
    draft: ContentDraft,
) -> Result<Content, ContentError> {
    draft.validate().map_err(|err| ContentError::Validation(err.to_string()))?;

    let class = reference.class(&draft.class_id).ok_or_else(|| {
        ContentError::Validation(format!("class_id: unknown class '{}'", draft.class_id))
    })?;
    let subject = reference.subject(&draft.subject_id).ok_or_else(|| {
        ContentError::Validation(format!("subject_id: unknown subject '{}'", draft.subject_id))
    })?;

    let id = Uuid::new_v4().to_string();
    let content = store
        .create_content(CreateContent {
            id: &id,
            title: draft.title.trim(),
            body_html: &draft.body_html,
            class_id: &class.id,
            subject_id: &subject.id,
            grade_label: &class.name,
            subject_name: &subject.name,
            created_at: primitive_now_utc(),
        })
        .await?;

    tracing::info!(content_id = %content.id, class_id = %class.id, subject_id = %subject.id, "Content saved for review");
    Ok(content)
}

pub(crate) async fn update_content_status(
    store: &dyn Store,
    content_id: &str,
    next: ContentStatus,
) -> Result<Content, ContentError> {
    let content = store.find_content(content_id).await?.ok_or(ContentError::NotFound)?;

    let target = content.status.transition_to(next)?;
    if target == content.status {
        return Ok(content);
    }

    let updated = store
        .mark_content_reviewed(content_id, primitive_now_utc())
        .await?
        .ok_or(ContentError::NotFound)?;
    tracing::info!(content_id, status = target.as_str(), "Content status updated");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::{default_classes, default_subjects};
    use crate::test_support::MemoryStore;

    fn reference() -> ReferenceData {
        ReferenceData::new(default_subjects(), default_classes(), vec![], vec![], vec!["improve".into()])
    }

    fn draft() -> ContentDraft {
        ContentDraft {
            title: "Photosynthesis".to_string(),
            body_html: "<h1>Photosynthesis</h1>".to_string(),
            class_id: "grade-6".to_string(),
            subject_id: "science".to_string(),
        }
    }

    #[tokio::test]
    async fn saved_content_starts_under_review_with_resolved_labels() {
        let store = MemoryStore::new();
        let content = save_content(&store, &reference(), draft()).await.expect("save");

        assert_eq!(content.status, ContentStatus::UnderReview);
        assert_eq!(content.grade_label, "Grade 6");
        assert_eq!(content.subject_name, "Science");
        assert!(content.reviewed_at.is_none());
    }

    #[tokio::test]
    async fn unknown_class_is_rejected() {
        let store = MemoryStore::new();
        let mut bad = draft();
        bad.class_id = "grade-12".to_string();

        let err = save_content(&store, &reference(), bad).await.expect_err("class");
        assert!(matches!(err, ContentError::Validation(ref m) if m.contains("class_id")));
        assert!(store.snapshot().contents.is_empty());
    }

    #[tokio::test]
    async fn review_is_forward_only_and_idempotent() {
        let store = MemoryStore::new();
        let content = save_content(&store, &reference(), draft()).await.expect("save");

        let reviewed = update_content_status(&store, &content.id, ContentStatus::Reviewed)
            .await
            .expect("review");
        assert_eq!(reviewed.status, ContentStatus::Reviewed);
        assert!(reviewed.reviewed_at.is_some());

        let again = update_content_status(&store, &content.id, ContentStatus::Reviewed)
            .await
            .expect("idempotent");
        assert_eq!(again.status, ContentStatus::Reviewed);
        assert_eq!(again.reviewed_at, reviewed.reviewed_at);

        let backwards = update_content_status(&store, &content.id, ContentStatus::UnderReview).await;
        assert!(matches!(backwards, Err(ContentError::InvalidTransition(_))));
        assert_eq!(store.snapshot().contents[0].status, ContentStatus::Reviewed);
    }

    #[tokio::test]
    async fn missing_content_is_not_found() {
        let store = MemoryStore::new();
        let result = update_content_status(&store, "nope", ContentStatus::Reviewed).await;
        assert!(matches!(result, Err(ContentError::NotFound)));
    }
}
