use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use time::Date;

use crate::core::reference::ReferenceData;
use crate::db::models::{Assignment, Grade, Material, Student};
use crate::db::types::AssignmentStatus;
use crate::repositories::store::{Store, StoreError};
use crate::services::quiz::{parse_quiz, QuizQuestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum GradeBand {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

pub(crate) fn grade_band(grade: i32) -> GradeBand {
    match grade {
        90..=i32::MAX => GradeBand::Excellent,
        80..=89 => GradeBand::Good,
        70..=79 => GradeBand::Fair,
        _ => GradeBand::NeedsAttention,
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GradeEntry {
    pub(crate) grade: Grade,
    pub(crate) subject_name: String,
}

#[derive(Debug, Clone)]
pub(crate) struct AssignmentEntry {
    pub(crate) assignment: Assignment,
    pub(crate) questions: Vec<QuizQuestion>,
}

impl AssignmentEntry {
    pub(crate) fn new(assignment: Assignment) -> Self {
        let questions = parse_quiz(&assignment.quiz);
        Self { assignment, questions }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StudentDashboard {
    pub(crate) student: Student,
    pub(crate) grades: Vec<GradeEntry>,
    pub(crate) average_grade: f64,
    pub(crate) trend: i32,
    pub(crate) best_subject: Option<String>,
    pub(crate) open_assignments: usize,
    pub(crate) assignments: Vec<AssignmentEntry>,
    pub(crate) materials_by_subject: BTreeMap<String, Vec<Material>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProgressPoint {
    pub(crate) date: Date,
    pub(crate) grades: BTreeMap<String, i32>,
}

#[derive(Debug, Clone)]
pub(crate) struct MatrixRow {
    pub(crate) student: Student,
    /// One cell per configured subject, in reference order.
    pub(crate) cells: Vec<(String, Option<Grade>)>,
}

#[derive(Debug, Clone)]
pub(crate) struct StudentPerformance {
    pub(crate) student: Student,
    pub(crate) grade_count: usize,
    pub(crate) average_grade: Option<f64>,
}

#[derive(Debug, Clone)]
pub(crate) struct ActivityEntry {
    pub(crate) student_name: String,
    pub(crate) assignment: Assignment,
}

fn average(grades: &[Grade]) -> Option<f64> {
    if grades.is_empty() {
        return None;
    }
    let total: i64 = grades.iter().map(|grade| i64::from(grade.grade)).sum();
    Some(total as f64 / grades.len() as f64)
}

fn sorted_by_date(grades: &[Grade]) -> Vec<&Grade> {
    let mut sorted: Vec<&Grade> = grades.iter().collect();
    sorted.sort_by_key(|grade| (grade.date, grade.created_at));
    sorted
}

/// Latest grade minus the one before it, by date.
pub(crate) fn grade_trend(grades: &[Grade]) -> i32 {
    match sorted_by_date(grades).as_slice() {
        [.., previous, latest] => latest.grade - previous.grade,
        _ => 0,
    }
}

/// Highest grade wins; ties go to the grade recorded first.
fn best_subject_id(grades: &[Grade]) -> Option<&str> {
    grades
        .iter()
        .fold(None::<&Grade>, |best, grade| match best {
            Some(current) if current.grade >= grade.grade => Some(current),
            _ => Some(grade),
        })
        .map(|grade| grade.subject_id.as_str())
}

pub(crate) fn progress_series(grades: &[Grade]) -> Vec<ProgressPoint> {
    let mut by_date: BTreeMap<Date, BTreeMap<String, i32>> = BTreeMap::new();
    for grade in sorted_by_date(grades) {
        by_date.entry(grade.date).or_default().insert(grade.subject_id.clone(), grade.grade);
    }
    by_date.into_iter().map(|(date, grades)| ProgressPoint { date, grades }).collect()
}

pub(crate) async fn student_dashboard(
    store: &dyn Store,
    reference: &ReferenceData,
    student_id: &str,
) -> Result<Option<StudentDashboard>, StoreError> {
    let Some(student) = store.find_student(student_id).await? else {
        return Ok(None);
    };

    let grades = store.list_grades(student_id).await?;
    let assignments = store.list_assignments(student_id).await?;
    let materials = store.list_all_materials().await?;

    let average_grade = average(&grades).unwrap_or(0.0);
    let trend = grade_trend(&grades);
    let best_subject = best_subject_id(&grades)
        .and_then(|id| reference.subject(id))
        .map(|subject| subject.name.clone());
    let open_assignments =
        assignments.iter().filter(|a| a.status == AssignmentStatus::Pending).count();

    let mut materials_by_subject: BTreeMap<String, Vec<Material>> = BTreeMap::new();
    for material in materials {
        let subject_name = reference.subject_name_or_unknown(&material.subject_id);
        materials_by_subject.entry(subject_name).or_default().push(material);
    }

    let grades = grades
        .into_iter()
        .map(|grade| GradeEntry {
            subject_name: reference.subject_name_or_unknown(&grade.subject_id),
            grade,
        })
        .collect();

    Ok(Some(StudentDashboard {
        student,
        grades,
        average_grade,
        trend,
        best_subject,
        open_assignments,
        assignments: assignments.into_iter().map(AssignmentEntry::new).collect(),
        materials_by_subject,
    }))
}

fn group_grades(grades: Vec<Grade>) -> HashMap<String, Vec<Grade>> {
    let mut grouped: HashMap<String, Vec<Grade>> = HashMap::new();
    for grade in grades {
        grouped.entry(grade.student_id.clone()).or_default().push(grade);
    }
    grouped
}

pub(crate) async fn grade_matrix(
    store: &dyn Store,
    reference: &ReferenceData,
) -> Result<Vec<MatrixRow>, StoreError> {
    let students = store.list_students().await?;
    let mut grouped = group_grades(store.list_all_grades().await?);

    Ok(students
        .into_iter()
        .map(|student| {
            let grades = grouped.remove(&student.id).unwrap_or_default();
            let cells = reference
                .subjects()
                .iter()
                .map(|subject| {
                    let first = grades.iter().find(|grade| grade.subject_id == subject.id).cloned();
                    (subject.id.clone(), first)
                })
                .collect();
            MatrixRow { student, cells }
        })
        .collect())
}

pub(crate) async fn performance_overview(
    store: &dyn Store,
) -> Result<Vec<StudentPerformance>, StoreError> {
    let students = store.list_students().await?;
    let mut grouped = group_grades(store.list_all_grades().await?);

    Ok(students
        .into_iter()
        .map(|student| {
            let grades = grouped.remove(&student.id).unwrap_or_default();
            StudentPerformance {
                grade_count: grades.len(),
                average_grade: average(&grades),
                student,
            }
        })
        .collect())
}

pub(crate) async fn activity_feed(store: &dyn Store) -> Result<Vec<ActivityEntry>, StoreError> {
    let names: HashMap<String, String> = store
        .list_students()
        .await?
        .into_iter()
        .map(|student| (student.id, student.name))
        .collect();

    let mut assignments = store.list_all_assignments().await?;
    assignments.sort_by(|a, b| {
        b.assigned_at.cmp(&a.assigned_at).then_with(|| b.created_at.cmp(&a.created_at))
    });

    Ok(assignments
        .into_iter()
        .map(|assignment| ActivityEntry {
            student_name: names
                .get(&assignment.student_id)
                .cloned()
                .unwrap_or_else(|| "Unknown Student".to_string()),
            assignment,
        })
        .collect())
}
