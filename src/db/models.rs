use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime};

use crate::db::types::{AssignmentStatus, ContentStatus};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Student {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) roll_number: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Grade {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) subject_id: String,
    pub(crate) grade: i32,
    pub(crate) feedback: String,
    pub(crate) date: Date,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Assignment {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) subject_id: String,
    pub(crate) subject_name: String,
    pub(crate) feedback: String,
    pub(crate) quiz: String,
    pub(crate) status: AssignmentStatus,
    pub(crate) assigned_at: Date,
    pub(crate) completed_at: Option<PrimitiveDateTime>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Content {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) body_html: String,
    pub(crate) class_id: String,
    pub(crate) subject_id: String,
    pub(crate) grade_label: String,
    pub(crate) subject_name: String,
    pub(crate) status: ContentStatus,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) reviewed_at: Option<PrimitiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Material {
    pub(crate) id: String,
    pub(crate) class_id: String,
    pub(crate) subject_id: String,
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) kind: String,
    pub(crate) uploaded_at: PrimitiveDateTime,
}
