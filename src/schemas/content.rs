use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::models::{Content, Material};
use crate::db::types::ContentStatus;

#[derive(Debug, Serialize)]
pub(crate) struct ContentResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) body_html: String,
    pub(crate) class_id: String,
    pub(crate) subject_id: String,
    pub(crate) grade_label: String,
    pub(crate) subject_name: String,
    pub(crate) status: ContentStatus,
    pub(crate) created_at: String,
    pub(crate) reviewed_at: Option<String>,
}

impl ContentResponse {
    pub(crate) fn from_db(content: Content) -> Self {
        Self {
            id: content.id,
            title: content.title,
            body_html: content.body_html,
            class_id: content.class_id,
            subject_id: content.subject_id,
            grade_label: content.grade_label,
            subject_name: content.subject_name,
            status: content.status,
            created_at: format_primitive(content.created_at),
            reviewed_at: content.reviewed_at.map(format_primitive),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentStatusUpdate {
    pub(crate) status: ContentStatus,
}

#[derive(Debug, Serialize)]
pub(crate) struct MaterialResponse {
    pub(crate) id: String,
    pub(crate) class_id: String,
    pub(crate) subject_id: String,
    pub(crate) name: String,
    pub(crate) url: String,
    #[serde(rename = "type")]
    pub(crate) kind: String,
    pub(crate) uploaded_at: String,
}

impl MaterialResponse {
    pub(crate) fn from_db(material: Material) -> Self {
        Self {
            id: material.id,
            class_id: material.class_id,
            subject_id: material.subject_id,
            name: material.name,
            url: material.url,
            kind: material.kind,
            uploaded_at: format_primitive(material.uploaded_at),
        }
    }
}
