use sqlx::PgPool;

use crate::db::models::Assignment;
use crate::db::types::AssignmentStatus;

const COLUMNS: &str = "\
    id, student_id, subject_id, subject_name, feedback, quiz, status, \
    assigned_at, completed_at, created_at";

pub(crate) struct CreateAssignment<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) subject_id: &'a str,
    pub(crate) subject_name: &'a str,
    pub(crate) feedback: &'a str,
    pub(crate) quiz: &'a str,
    pub(crate) assigned_at: time::Date,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAssignment<'_>,
) -> Result<Assignment, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "INSERT INTO assignments (
            id, student_id, subject_id, subject_name, feedback, quiz, status,
            assigned_at, completed_at, created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,NULL,$9)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.subject_id)
    .bind(params.subject_name)
    .bind(params.feedback)
    .bind(params.quiz)
    .bind(AssignmentStatus::Pending)
    .bind(params.assigned_at)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_for_student(
    pool: &PgPool,
    student_id: &str,
    assignment_id: &str,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments WHERE id = $1 AND student_id = $2"
    ))
    .bind(assignment_id)
    .bind(student_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_by_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS}
         FROM assignments
         WHERE student_id = $1
         ORDER BY assigned_at DESC, created_at DESC, id DESC"
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_all(pool: &PgPool) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments ORDER BY assigned_at DESC, created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Only pending rows move; an already completed row keeps its original timestamp.
pub(crate) async fn mark_completed(
    pool: &PgPool,
    student_id: &str,
    assignment_id: &str,
    completed_at: time::PrimitiveDateTime,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "UPDATE assignments
         SET status = $3,
             completed_at = COALESCE(completed_at, $4)
         WHERE id = $1 AND student_id = $2
         RETURNING {COLUMNS}"
    ))
    .bind(assignment_id)
    .bind(student_id)
    .bind(AssignmentStatus::Completed)
    .bind(completed_at)
    .fetch_optional(pool)
    .await
}
