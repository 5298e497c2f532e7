use serde::{Deserialize, Serialize};

use crate::core::config::Settings;

pub(crate) const DEFAULT_ASSIGNMENT_KEYWORDS: &[&str] = &["improvement", "areas", "improve", "build"];
pub(crate) const DEFAULT_TEACHER_EMAILS: &[&str] = &["1teacher@example.com"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Subject {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SchoolClass {
    pub(crate) id: String,
    pub(crate) name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub(crate) fn can_teach(self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }
}

/// Static lookup tables shared by every request.
#[derive(Debug, Clone)]
pub(crate) struct ReferenceData {
    subjects: Vec<Subject>,
    classes: Vec<SchoolClass>,
    teacher_emails: Vec<String>,
    admin_emails: Vec<String>,
    assignment_keywords: Vec<String>,
}

impl ReferenceData {
    pub(crate) fn new(
        subjects: Vec<Subject>,
        classes: Vec<SchoolClass>,
        teacher_emails: Vec<String>,
        admin_emails: Vec<String>,
        assignment_keywords: Vec<String>,
    ) -> Self {
        Self {
            subjects,
            classes,
            teacher_emails: teacher_emails.into_iter().map(|e| e.to_lowercase()).collect(),
            admin_emails: admin_emails.into_iter().map(|e| e.to_lowercase()).collect(),
            assignment_keywords: assignment_keywords
                .into_iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub(crate) fn from_settings(settings: &Settings) -> Self {
        let reference = settings.reference();
        Self::new(
            reference.subjects.clone(),
            reference.classes.clone(),
            reference.teacher_emails.clone(),
            reference.admin_emails.clone(),
            reference.assignment_keywords.clone(),
        )
    }

    pub(crate) fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub(crate) fn classes(&self) -> &[SchoolClass] {
        &self.classes
    }

    pub(crate) fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.id == id)
    }

    pub(crate) fn class(&self, id: &str) -> Option<&SchoolClass> {
        self.classes.iter().find(|class| class.id == id)
    }

    pub(crate) fn subject_name_or_unknown(&self, id: &str) -> String {
        self.subject(id)
            .map(|subject| subject.name.clone())
            .unwrap_or_else(|| "Unknown Subject".to_string())
    }

    pub(crate) fn role_for_email(&self, email: &str) -> Role {
        let email = email.trim().to_lowercase();
        if self.admin_emails.iter().any(|candidate| *candidate == email) {
            Role::Admin
        } else if self.teacher_emails.iter().any(|candidate| *candidate == email) {
            Role::Teacher
        } else {
            Role::Student
        }
    }

    /// Returns the first configured keyword found in `feedback`, case-insensitively.
    pub(crate) fn matching_keyword(&self, feedback: &str) -> Option<&str> {
        let lowered = feedback.to_lowercase();
        self.assignment_keywords
            .iter()
            .find(|keyword| lowered.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

pub(crate) fn default_subjects() -> Vec<Subject> {
    [
        ("math", "Mathematics", "calculator"),
        ("science", "Science", "flask-conical"),
        ("english", "English", "book"),
        ("history", "History", "globe"),
        ("biology", "Biology", "dna"),
    ]
    .into_iter()
    .map(|(id, name, icon)| Subject {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

pub(crate) fn default_classes() -> Vec<SchoolClass> {
    [("grade-5", "Grade 5"), ("grade-6", "Grade 6"), ("grade-7", "Grade 7")]
        .into_iter()
        .map(|(id, name)| SchoolClass { id: id.to_string(), name: name.to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceData {
        ReferenceData::new(
            default_subjects(),
            default_classes(),
            vec!["Teacher@School.org".to_string()],
            vec!["head@school.org".to_string()],
            DEFAULT_ASSIGNMENT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        )
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let data = reference();
        assert_eq!(data.matching_keyword("Needs IMPROVEMENT in algebra"), Some("improvement"));
        assert_eq!(data.matching_keyword("needs improvement in algebra"), Some("improvement"));
        assert_eq!(data.matching_keyword("great job, keep it up"), None);
    }

    #[test]
    fn roles_follow_allowlists() {
        let data = reference();
        assert_eq!(data.role_for_email("teacher@school.org"), Role::Teacher);
        assert_eq!(data.role_for_email(" HEAD@school.org "), Role::Admin);
        assert_eq!(data.role_for_email("pupil@school.org"), Role::Student);
        assert!(Role::Admin.can_teach());
        assert!(!Role::Student.can_teach());
    }

    #[test]
    fn unknown_subject_falls_back() {
        let data = reference();
        assert_eq!(data.subject_name_or_unknown("english"), "English");
        assert_eq!(data.subject_name_or_unknown("latin"), "Unknown Subject");
    }
}
