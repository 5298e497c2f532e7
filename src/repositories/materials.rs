use sqlx::PgPool;

use crate::db::models::Material;

const COLUMNS: &str = "id, class_id, subject_id, name, url, kind, uploaded_at";

pub(crate) struct CreateMaterial<'a> {
    pub(crate) id: &'a str,
    pub(crate) class_id: &'a str,
    pub(crate) subject_id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) url: &'a str,
    pub(crate) kind: &'a str,
    pub(crate) uploaded_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateMaterial<'_>,
) -> Result<Material, sqlx::Error> {
    sqlx::query_as::<_, Material>(&format!(
        "INSERT INTO materials (id, class_id, subject_id, name, url, kind, uploaded_at)
         VALUES ($1,$2,$3,$4,$5,$6,$7)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.class_id)
    .bind(params.subject_id)
    .bind(params.name)
    .bind(params.url)
    .bind(params.kind)
    .bind(params.uploaded_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_for_class_subject(
    pool: &PgPool,
    class_id: &str,
    subject_id: &str,
) -> Result<Vec<Material>, sqlx::Error> {
    sqlx::query_as::<_, Material>(&format!(
        "SELECT {COLUMNS}
         FROM materials
         WHERE class_id = $1 AND subject_id = $2
         ORDER BY uploaded_at DESC, id DESC"
    ))
    .bind(class_id)
    .bind(subject_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_all(pool: &PgPool) -> Result<Vec<Material>, sqlx::Error> {
    sqlx::query_as::<_, Material>(&format!(
        "SELECT {COLUMNS} FROM materials ORDER BY uploaded_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await
}
