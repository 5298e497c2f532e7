use serde::Serialize;

use crate::core::reference::ReferenceData;
use crate::schemas::student::{AssignmentResponse, GradeResponse, StudentResponse};
use crate::services::dashboards::AssignmentEntry;
use crate::services::grading::{AssignmentOutcome, GradeEntryOutcome};

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub(crate) enum AssignmentOutcomeResponse {
    NotTriggered,
    Created { assignment: AssignmentResponse },
    Failed { reason: String },
}

#[derive(Debug, Serialize)]
pub(crate) struct GradeEntryResponse {
    pub(crate) student: StudentResponse,
    pub(crate) student_created: bool,
    pub(crate) grade: GradeResponse,
    pub(crate) assignment: AssignmentOutcomeResponse,
}

impl GradeEntryResponse {
    pub(crate) fn from_outcome(outcome: GradeEntryOutcome, reference: &ReferenceData) -> Self {
        let assignment = match outcome.assignment {
            AssignmentOutcome::NotTriggered => AssignmentOutcomeResponse::NotTriggered,
            AssignmentOutcome::Created(assignment) => AssignmentOutcomeResponse::Created {
                assignment: AssignmentResponse::from_entry(AssignmentEntry::new(assignment)),
            },
            AssignmentOutcome::Failed { reason } => AssignmentOutcomeResponse::Failed { reason },
        };

        Self {
            student: StudentResponse::from_db(outcome.student),
            student_created: outcome.student_created,
            grade: GradeResponse::from_db(outcome.grade, reference),
            assignment,
        }
    }
}
