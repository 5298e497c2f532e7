use time::{macros::date, Date, Duration};
use uuid::Uuid;

use crate::core::time::primitive_now_utc;
use crate::repositories::{
    grades::CreateGrade,
    store::{Store, StoreError},
    students::CreateStudent,
};

type DemoGrade = (&'static str, i32, &'static str, Date);

const DEMO_STUDENTS: &[(&str, &[DemoGrade])] = &[
    (
        "Alex Johnson",
        &[
            ("math", 85, "Good understanding of core concepts.", date!(2023 - 09 - 15)),
            ("science", 92, "Excellent work in the lab.", date!(2023 - 09 - 20)),
            ("english", 78, "Needs to work on essay structure.", date!(2023 - 09 - 22)),
            ("history", 88, "Very insightful analysis.", date!(2023 - 09 - 18)),
            ("math", 88, "Improved significantly on algebra.", date!(2023 - 10 - 15)),
            ("science", 95, "Top of the class on the physics test.", date!(2023 - 10 - 20)),
            ("english", 82, "Great improvement in writing skills.", date!(2023 - 10 - 22)),
        ],
    ),
    (
        "Maria Garcia",
        &[
            ("math", 95, "Exceptional problem-solving skills.", date!(2023 - 09 - 15)),
            ("science", 88, "Solid effort on the project.", date!(2023 - 09 - 20)),
            ("english", 91, "Creative and well-written stories.", date!(2023 - 09 - 22)),
            ("history", 82, "Good participation in discussions.", date!(2023 - 09 - 18)),
        ],
    ),
    (
        "Chen Wei",
        &[
            ("math", 72, "Struggling with geometry, needs extra help.", date!(2023 - 09 - 15)),
            ("science", 65, "Needs to review lab safety procedures.", date!(2023 - 09 - 20)),
            ("english", 80, "Strong vocabulary, but grammar needs work.", date!(2023 - 09 - 22)),
            ("history", 75, "Shows interest but needs to study more for tests.", date!(2023 - 09 - 18)),
        ],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeedOutcome {
    Seeded { students: usize, grades: usize },
    Skipped,
}

/// Loads the demo roster into an empty store. A store that already has
/// students is left untouched.
pub(crate) async fn seed_demo_data(store: &dyn Store) -> Result<SeedOutcome, StoreError> {
    if store.count_students().await? > 0 {
        tracing::info!("Store already has students; skipping demo seed");
        return Ok(SeedOutcome::Skipped);
    }

    // One microsecond apart so insertion order survives a sort on created_at.
    let started = primitive_now_utc();
    let mut written: i64 = 0;
    let mut next_timestamp = || {
        written += 1;
        started + Duration::microseconds(written)
    };

    let mut grade_total = 0;
    for (name, grades) in DEMO_STUDENTS {
        let student_id = Uuid::new_v4().to_string();
        store
            .create_student(CreateStudent {
                id: &student_id,
                name,
                roll_number: None,
                created_at: next_timestamp(),
            })
            .await?;

        for (subject_id, grade, feedback, date) in grades.iter() {
            let grade_id = Uuid::new_v4().to_string();
            store
                .append_grade(CreateGrade {
                    id: &grade_id,
                    student_id: &student_id,
                    subject_id,
                    grade: *grade,
                    feedback,
                    date: *date,
                    created_at: next_timestamp(),
                })
                .await?;
            grade_total += 1;
        }
    }

    tracing::info!(students = DEMO_STUDENTS.len(), grades = grade_total, "Seeded demo data");
    Ok(SeedOutcome::Seeded { students: DEMO_STUDENTS.len(), grades: grade_total })
}
