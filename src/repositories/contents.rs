use sqlx::PgPool;

use crate::db::models::Content;
use crate::db::types::ContentStatus;

const COLUMNS: &str = "\
    id, title, body_html, class_id, subject_id, grade_label, subject_name, \
    status, created_at, reviewed_at";

pub(crate) struct CreateContent<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) body_html: &'a str,
    pub(crate) class_id: &'a str,
    pub(crate) subject_id: &'a str,
    pub(crate) grade_label: &'a str,
    pub(crate) subject_name: &'a str,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateContent<'_>) -> Result<Content, sqlx::Error> {
    sqlx::query_as::<_, Content>(&format!(
        "INSERT INTO contents (
            id, title, body_html, class_id, subject_id, grade_label, subject_name,
            status, created_at, reviewed_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,NULL)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.body_html)
    .bind(params.class_id)
    .bind(params.subject_id)
    .bind(params.grade_label)
    .bind(params.subject_name)
    .bind(ContentStatus::UnderReview)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Content>, sqlx::Error> {
    sqlx::query_as::<_, Content>(&format!("SELECT {COLUMNS} FROM contents WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list(pool: &PgPool) -> Result<Vec<Content>, sqlx::Error> {
    sqlx::query_as::<_, Content>(&format!("SELECT {COLUMNS} FROM contents ORDER BY created_at DESC, id DESC"))
        .fetch_all(pool)
        .await
}

pub(crate) async fn mark_reviewed(
    pool: &PgPool,
    id: &str,
    reviewed_at: time::PrimitiveDateTime,
) -> Result<Option<Content>, sqlx::Error> {
    sqlx::query_as::<_, Content>(&format!(
        "UPDATE contents
         SET status = $2,
             reviewed_at = COALESCE(reviewed_at, $3)
         WHERE id = $1
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(ContentStatus::Reviewed)
    .bind(reviewed_at)
    .fetch_optional(pool)
    .await
}
