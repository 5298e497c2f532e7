use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::core::{
    metrics,
    reference::ReferenceData,
    time::{primitive_now_utc, today_utc},
};
use crate::db::models::{Assignment, Grade, Student};
use crate::db::types::AssignmentStatus;
use crate::repositories::{
    assignments::CreateAssignment,
    grades::CreateGrade,
    store::{Store, StoreError},
    students::CreateStudent,
};
use crate::services::ai_client::TextGenerator;
use crate::services::ai_flows;

#[derive(Debug, Clone, Deserialize, Validate)]
pub(crate) struct GradeSubmission {
    #[validate(length(min = 1, max = 32, message = "roll_number must be 1-32 characters"))]
    pub(crate) roll_number: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "student_name must be at most 255 characters"))]
    pub(crate) student_name: Option<String>,
    #[validate(length(min = 1, message = "subject_id must not be empty"))]
    pub(crate) subject_id: String,
    #[validate(range(min = 0, max = 100, message = "grade must be between 0 and 100"))]
    pub(crate) grade: i32,
    #[validate(length(min = 5, max = 200, message = "feedback must be 5-200 characters"))]
    pub(crate) feedback: String,
}

#[derive(Debug, Error)]
pub(crate) enum GradeEntryError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub(crate) enum AssignmentError {
    #[error("Assignment not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What happened to the remediation assignment after the grade was stored.
#[derive(Debug, Clone)]
pub(crate) enum AssignmentOutcome {
    NotTriggered,
    Created(Assignment),
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub(crate) struct GradeEntryOutcome {
    pub(crate) student: Student,
    pub(crate) student_created: bool,
    pub(crate) grade: Grade,
    pub(crate) assignment: AssignmentOutcome,
}

fn check_submission(
    reference: &ReferenceData,
    submission: &GradeSubmission,
) -> Result<(), GradeEntryError> {
    submission.validate().map_err(|err| GradeEntryError::Validation(err.to_string()))?;

    if submission.roll_number.trim().is_empty() {
        return Err(GradeEntryError::Validation(
            "roll_number: roll_number must be 1-32 characters".to_string(),
        ));
    }
    if submission.feedback.trim().is_empty() {
        return Err(GradeEntryError::Validation(
            "feedback: feedback must be 5-200 characters".to_string(),
        ));
    }
    if reference.subject(&submission.subject_id).is_none() {
        return Err(GradeEntryError::Validation(format!(
            "subject_id: unknown subject '{}'",
            submission.subject_id
        )));
    }

    Ok(())
}

pub(crate) async fn lookup_student_by_roll_number(
    store: &dyn Store,
    roll_number: &str,
) -> Result<Option<Student>, StoreError> {
    let roll_number = roll_number.trim();
    if roll_number.is_empty() {
        return Ok(None);
    }
    store.find_student_by_roll_number(roll_number).await
}

async fn resolve_student(
    store: &dyn Store,
    submission: &GradeSubmission,
) -> Result<(Student, bool), GradeEntryError> {
    let roll_number = submission.roll_number.trim();
    if let Some(student) = store.find_student_by_roll_number(roll_number).await? {
        return Ok((student, false));
    }

    let name = submission.student_name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(GradeEntryError::Validation(
            "student_name: new student, please provide a name".to_string(),
        ));
    }

    let id = Uuid::new_v4().to_string();
    let created = store
        .create_student(CreateStudent {
            id: &id,
            name,
            roll_number: Some(roll_number),
            created_at: primitive_now_utc(),
        })
        .await;

    match created {
        Ok(student) => {
            tracing::info!(student_id = %student.id, roll_number, "Registered new student");
            Ok((student, true))
        }
        // A concurrent submission registered the same roll number first.
        Err(StoreError::Conflict(reason)) => {
            let student = store
                .find_student_by_roll_number(roll_number)
                .await?
                .ok_or(StoreError::Conflict(reason))?;
            tracing::debug!(student_id = %student.id, roll_number, "Roll number registered concurrently");
            Ok((student, false))
        }
        Err(err) => Err(err.into()),
    }
}

async fn create_assignment(
    store: &dyn Store,
    generator: &dyn TextGenerator,
    student: &Student,
    subject_id: &str,
    subject_name: &str,
    feedback: &str,
) -> AssignmentOutcome {
    let generated = match ai_flows::generate_assignment(generator, subject_name, feedback).await {
        Ok(generated) => generated,
        Err(err) => {
            tracing::warn!(student_id = %student.id, error = %err, "Assignment generation failed");
            metrics::record_assignment("failed");
            return AssignmentOutcome::Failed { reason: err.to_string() };
        }
    };

    let id = Uuid::new_v4().to_string();
    let created = store
        .create_assignment(CreateAssignment {
            id: &id,
            student_id: &student.id,
            subject_id,
            subject_name,
            feedback,
            quiz: &generated.quiz,
            assigned_at: today_utc(),
            created_at: primitive_now_utc(),
        })
        .await;

    match created {
        Ok(assignment) => {
            metrics::record_assignment("created");
            tracing::info!(
                student_id = %student.id,
                assignment_id = %assignment.id,
                subject_id,
                "Assignment created from feedback"
            );
            AssignmentOutcome::Created(assignment)
        }
        Err(err) => {
            metrics::record_assignment("failed");
            tracing::error!(student_id = %student.id, error = %err, "Failed to store assignment");
            AssignmentOutcome::Failed { reason: "Could not save the generated assignment".to_string() }
        }
    }
}

/// Records a grade and, when the feedback mentions a trigger keyword, a
/// pending remediation assignment. The grade stays recorded even when the
/// assignment step fails.
pub(crate) async fn submit_grade(
    store: &dyn Store,
    generator: &dyn TextGenerator,
    reference: &ReferenceData,
    submission: GradeSubmission,
) -> Result<GradeEntryOutcome, GradeEntryError> {
    check_submission(reference, &submission)?;

    let (student, student_created) = resolve_student(store, &submission).await?;

    let grade_id = Uuid::new_v4().to_string();
    let grade = store
        .append_grade(CreateGrade {
            id: &grade_id,
            student_id: &student.id,
            subject_id: &submission.subject_id,
            grade: submission.grade,
            feedback: &submission.feedback,
            date: today_utc(),
            created_at: primitive_now_utc(),
        })
        .await?;
    metrics::record_grade(&grade.subject_id);

    let assignment = match reference.matching_keyword(&submission.feedback) {
        Some(keyword) => {
            tracing::debug!(student_id = %student.id, keyword, "Feedback triggers an assignment");
            let subject_name = reference.subject_name_or_unknown(&submission.subject_id);
            create_assignment(
                store,
                generator,
                &student,
                &submission.subject_id,
                &subject_name,
                &submission.feedback,
            )
            .await
        }
        None => AssignmentOutcome::NotTriggered,
    };

    Ok(GradeEntryOutcome { student, student_created, grade, assignment })
}

/// Marks an assignment completed. Completing twice keeps the first completion time.
pub(crate) async fn complete_assignment(
    store: &dyn Store,
    student_id: &str,
    assignment_id: &str,
) -> Result<Assignment, AssignmentError> {
    let assignment = store
        .find_assignment(student_id, assignment_id)
        .await?
        .ok_or(AssignmentError::NotFound)?;

    if assignment.status == AssignmentStatus::Completed {
        return Ok(assignment);
    }

    store
        .complete_assignment(student_id, assignment_id, primitive_now_utc())
        .await?
        .ok_or(AssignmentError::NotFound)
}
