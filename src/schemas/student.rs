use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::reference::ReferenceData;
use crate::core::time::{format_date, format_primitive};
use crate::db::models::{Grade, Student};
use crate::db::types::AssignmentStatus;
use crate::schemas::content::MaterialResponse;
use crate::services::dashboards::{
    grade_band, ActivityEntry, AssignmentEntry, GradeBand, GradeEntry, MatrixRow, ProgressPoint,
    StudentDashboard, StudentPerformance,
};
use crate::services::quiz::QuizQuestion;

#[derive(Debug, Serialize)]
pub(crate) struct StudentResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) roll_number: Option<String>,
    pub(crate) created_at: String,
}

impl StudentResponse {
    pub(crate) fn from_db(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            roll_number: student.roll_number,
            created_at: format_primitive(student.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GradeResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) subject_id: String,
    pub(crate) subject_name: String,
    pub(crate) grade: i32,
    pub(crate) band: GradeBand,
    pub(crate) feedback: String,
    pub(crate) date: String,
    pub(crate) created_at: String,
}

impl GradeResponse {
    pub(crate) fn from_entry(entry: GradeEntry) -> Self {
        let GradeEntry { grade, subject_name } = entry;
        Self {
            band: grade_band(grade.grade),
            id: grade.id,
            student_id: grade.student_id,
            subject_id: grade.subject_id,
            subject_name,
            grade: grade.grade,
            feedback: grade.feedback,
            date: format_date(grade.date),
            created_at: format_primitive(grade.created_at),
        }
    }

    pub(crate) fn from_db(grade: Grade, reference: &ReferenceData) -> Self {
        let subject_name = reference.subject_name_or_unknown(&grade.subject_id);
        Self::from_entry(GradeEntry { grade, subject_name })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) subject_id: String,
    pub(crate) subject_name: String,
    pub(crate) feedback: String,
    pub(crate) quiz: String,
    pub(crate) questions: Vec<QuizQuestion>,
    pub(crate) status: AssignmentStatus,
    pub(crate) assigned_at: String,
    pub(crate) completed_at: Option<String>,
}

impl AssignmentResponse {
    pub(crate) fn from_entry(entry: AssignmentEntry) -> Self {
        let AssignmentEntry { assignment, questions } = entry;
        Self {
            id: assignment.id,
            student_id: assignment.student_id,
            subject_id: assignment.subject_id,
            subject_name: assignment.subject_name,
            feedback: assignment.feedback,
            quiz: assignment.quiz,
            questions,
            status: assignment.status,
            assigned_at: format_date(assignment.assigned_at),
            completed_at: assignment.completed_at.map(format_primitive),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) student: StudentResponse,
    pub(crate) average_grade: f64,
    pub(crate) trend: i32,
    pub(crate) best_subject: Option<String>,
    pub(crate) open_assignments: usize,
    pub(crate) grades: Vec<GradeResponse>,
    pub(crate) assignments: Vec<AssignmentResponse>,
    pub(crate) materials_by_subject: BTreeMap<String, Vec<MaterialResponse>>,
}

impl DashboardResponse {
    pub(crate) fn from_dashboard(dashboard: StudentDashboard) -> Self {
        Self {
            student: StudentResponse::from_db(dashboard.student),
            average_grade: dashboard.average_grade,
            trend: dashboard.trend,
            best_subject: dashboard.best_subject,
            open_assignments: dashboard.open_assignments,
            grades: dashboard.grades.into_iter().map(GradeResponse::from_entry).collect(),
            assignments: dashboard
                .assignments
                .into_iter()
                .map(AssignmentResponse::from_entry)
                .collect(),
            materials_by_subject: dashboard
                .materials_by_subject
                .into_iter()
                .map(|(subject, materials)| {
                    (subject, materials.into_iter().map(MaterialResponse::from_db).collect())
                })
                .collect(),
        }
    }
}

/// One chart point: `{"date": "2024-01-10", "math": 85, ...}`.
#[derive(Debug, Serialize)]
pub(crate) struct ProgressPointResponse {
    pub(crate) date: String,
    #[serde(flatten)]
    pub(crate) grades: BTreeMap<String, i32>,
}

impl ProgressPointResponse {
    pub(crate) fn from_point(point: ProgressPoint) -> Self {
        Self { date: format_date(point.date), grades: point.grades }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MatrixCell {
    pub(crate) subject_id: String,
    pub(crate) grade: Option<i32>,
    pub(crate) band: Option<GradeBand>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MatrixRowResponse {
    pub(crate) student: StudentResponse,
    pub(crate) grades: Vec<MatrixCell>,
}

impl MatrixRowResponse {
    pub(crate) fn from_row(row: MatrixRow) -> Self {
        Self {
            student: StudentResponse::from_db(row.student),
            grades: row
                .cells
                .into_iter()
                .map(|(subject_id, grade)| {
                    let value = grade.map(|grade| grade.grade);
                    MatrixCell { subject_id, grade: value, band: value.map(grade_band) }
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PerformanceRowResponse {
    pub(crate) student: StudentResponse,
    pub(crate) grade_count: usize,
    pub(crate) average_grade: Option<f64>,
}

impl PerformanceRowResponse {
    pub(crate) fn from_row(row: StudentPerformance) -> Self {
        Self {
            student: StudentResponse::from_db(row.student),
            grade_count: row.grade_count,
            average_grade: row.average_grade,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ActivityResponse {
    pub(crate) assignment_id: String,
    pub(crate) student_id: String,
    pub(crate) student_name: String,
    pub(crate) subject_name: String,
    pub(crate) feedback: String,
    pub(crate) status: AssignmentStatus,
    pub(crate) assigned_at: String,
}

impl ActivityResponse {
    pub(crate) fn from_entry(entry: ActivityEntry) -> Self {
        let ActivityEntry { student_name, assignment } = entry;
        Self {
            assignment_id: assignment.id,
            student_id: assignment.student_id,
            student_name,
            subject_name: assignment.subject_name,
            feedback: assignment.feedback,
            status: assignment.status,
            assigned_at: format_date(assignment.assigned_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizAttemptRequest {
    #[serde(default)]
    pub(crate) answers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RollNumberQuery {
    pub(crate) roll_number: String,
}
