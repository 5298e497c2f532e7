use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use time::PrimitiveDateTime;

use crate::db::models::{Assignment, Content, Grade, Material, Student};
use crate::repositories::{
    assignments::{self, CreateAssignment},
    contents::{self, CreateContent},
    grades::{self, CreateGrade},
    materials::{self, CreateMaterial},
    students::{self, CreateStudent},
};

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Persistence seam used by services and handlers.
#[async_trait]
pub(crate) trait Store: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    async fn count_students(&self) -> Result<i64, StoreError>;
    async fn find_student(&self, id: &str) -> Result<Option<Student>, StoreError>;
    async fn find_student_by_roll_number(
        &self,
        roll_number: &str,
    ) -> Result<Option<Student>, StoreError>;
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;
    async fn create_student(&self, params: CreateStudent<'_>) -> Result<Student, StoreError>;

    async fn list_grades(&self, student_id: &str) -> Result<Vec<Grade>, StoreError>;
    async fn list_all_grades(&self) -> Result<Vec<Grade>, StoreError>;
    async fn append_grade(&self, params: CreateGrade<'_>) -> Result<Grade, StoreError>;

    async fn list_assignments(&self, student_id: &str) -> Result<Vec<Assignment>, StoreError>;
    async fn list_all_assignments(&self) -> Result<Vec<Assignment>, StoreError>;
    async fn find_assignment(
        &self,
        student_id: &str,
        assignment_id: &str,
    ) -> Result<Option<Assignment>, StoreError>;
    async fn create_assignment(
        &self,
        params: CreateAssignment<'_>,
    ) -> Result<Assignment, StoreError>;
    async fn complete_assignment(
        &self,
        student_id: &str,
        assignment_id: &str,
        completed_at: PrimitiveDateTime,
    ) -> Result<Option<Assignment>, StoreError>;

    async fn create_content(&self, params: CreateContent<'_>) -> Result<Content, StoreError>;
    async fn list_contents(&self) -> Result<Vec<Content>, StoreError>;
    async fn find_content(&self, id: &str) -> Result<Option<Content>, StoreError>;
    async fn mark_content_reviewed(
        &self,
        id: &str,
        reviewed_at: PrimitiveDateTime,
    ) -> Result<Option<Content>, StoreError>;

    async fn create_material(&self, params: CreateMaterial<'_>) -> Result<Material, StoreError>;
    async fn list_materials(
        &self,
        class_id: &str,
        subject_id: &str,
    ) -> Result<Vec<Material>, StoreError>;
    async fn list_all_materials(&self) -> Result<Vec<Material>, StoreError>;
}

#[derive(Clone)]
pub(crate) struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_unique(err: sqlx::Error, message: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict(message.to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn count_students(&self) -> Result<i64, StoreError> {
        Ok(students::count(&self.pool).await?)
    }

    async fn find_student(&self, id: &str) -> Result<Option<Student>, StoreError> {
        Ok(students::find_by_id(&self.pool, id).await?)
    }

    async fn find_student_by_roll_number(
        &self,
        roll_number: &str,
    ) -> Result<Option<Student>, StoreError> {
        Ok(students::find_by_roll_number(&self.pool, roll_number).await?)
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        Ok(students::list(&self.pool).await?)
    }

    async fn create_student(&self, params: CreateStudent<'_>) -> Result<Student, StoreError> {
        students::create(&self.pool, params)
            .await
            .map_err(|err| map_unique(err, "roll number already registered"))
    }

    async fn list_grades(&self, student_id: &str) -> Result<Vec<Grade>, StoreError> {
        Ok(grades::list_by_student(&self.pool, student_id).await?)
    }

    async fn list_all_grades(&self) -> Result<Vec<Grade>, StoreError> {
        Ok(grades::list_all(&self.pool).await?)
    }

    async fn append_grade(&self, params: CreateGrade<'_>) -> Result<Grade, StoreError> {
        Ok(grades::append(&self.pool, params).await?)
    }

    async fn list_assignments(&self, student_id: &str) -> Result<Vec<Assignment>, StoreError> {
        Ok(assignments::list_by_student(&self.pool, student_id).await?)
    }

    async fn list_all_assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        Ok(assignments::list_all(&self.pool).await?)
    }

    async fn find_assignment(
        &self,
        student_id: &str,
        assignment_id: &str,
    ) -> Result<Option<Assignment>, StoreError> {
        Ok(assignments::find_for_student(&self.pool, student_id, assignment_id).await?)
    }

    async fn create_assignment(
        &self,
        params: CreateAssignment<'_>,
    ) -> Result<Assignment, StoreError> {
        Ok(assignments::create(&self.pool, params).await?)
    }

    async fn complete_assignment(
        &self,
        student_id: &str,
        assignment_id: &str,
        completed_at: PrimitiveDateTime,
    ) -> Result<Option<Assignment>, StoreError> {
        Ok(assignments::mark_completed(&self.pool, student_id, assignment_id, completed_at).await?)
    }

    async fn create_content(&self, params: CreateContent<'_>) -> Result<Content, StoreError> {
        Ok(contents::create(&self.pool, params).await?)
    }

    async fn list_contents(&self) -> Result<Vec<Content>, StoreError> {
        Ok(contents::list(&self.pool).await?)
    }

    async fn find_content(&self, id: &str) -> Result<Option<Content>, StoreError> {
        Ok(contents::find_by_id(&self.pool, id).await?)
    }

    async fn mark_content_reviewed(
        &self,
        id: &str,
        reviewed_at: PrimitiveDateTime,
    ) -> Result<Option<Content>, StoreError> {
        Ok(contents::mark_reviewed(&self.pool, id, reviewed_at).await?)
    }

    async fn create_material(&self, params: CreateMaterial<'_>) -> Result<Material, StoreError> {
        Ok(materials::create(&self.pool, params).await?)
    }

    async fn list_materials(
        &self,
        class_id: &str,
        subject_id: &str,
    ) -> Result<Vec<Material>, StoreError> {
        Ok(materials::list_for_class_subject(&self.pool, class_id, subject_id).await?)
    }

    async fn list_all_materials(&self) -> Result<Vec<Material>, StoreError> {
        Ok(materials::list_all(&self.pool).await?)
    }
}
