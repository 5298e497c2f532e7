use sqlx::PgPool;

use crate::db::models::Grade;

const COLUMNS: &str = "id, student_id, subject_id, grade, feedback, date, created_at";

pub(crate) struct CreateGrade<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) subject_id: &'a str,
    pub(crate) grade: i32,
    pub(crate) feedback: &'a str,
    pub(crate) date: time::Date,
    pub(crate) created_at: time::PrimitiveDateTime,
}

/// Grades are append-only; there is deliberately no update or delete.
pub(crate) async fn append(pool: &PgPool, params: CreateGrade<'_>) -> Result<Grade, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!(
        "INSERT INTO grades (id, student_id, subject_id, grade, feedback, date, created_at)
         VALUES ($1,$2,$3,$4,$5,$6,$7)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.subject_id)
    .bind(params.grade)
    .bind(params.feedback)
    .bind(params.date)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_by_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<Grade>, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!(
        "SELECT {COLUMNS}
         FROM grades
         WHERE student_id = $1
         ORDER BY created_at ASC, id ASC"
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_all(pool: &PgPool) -> Result<Vec<Grade>, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!("SELECT {COLUMNS} FROM grades ORDER BY created_at ASC, id ASC"))
        .fetch_all(pool)
        .await
}
