use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::core::bootstrap;
use crate::test_support::{self, TestContext};

const QUIZ: &str = "1. What is 3 x 4?\nA) 7\nB) 12\nC) 34\nD) 1\nCorrect Answer: B\n\n2. What is 10 / 2?\nA) 5\nB) 8\nC) 20\nD) 2\nCorrect Answer: A";

async fn seeded_student_id(ctx: &TestContext, name: &str) -> String {
    bootstrap::seed_demo_data(ctx.store.as_ref()).await.expect("seed");
    ctx.store
        .snapshot()
        .students
        .into_iter()
        .find(|student| student.name == name)
        .map(|student| student.id)
        .expect("seeded student")
}

async fn grade_with_assignment(ctx: &TestContext) -> (String, String) {
    ctx.generator.push_text(&json!({ "quiz": QUIZ }).to_string());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/grades",
            Some(test_support::TEACHER_EMAIL),
            Some(json!({
                "roll_number": "M-7",
                "student_name": "Sam Okafor",
                "subject_id": "math",
                "grade": 58,
                "feedback": "Needs to build confidence with multiplication"
            })),
        ))
        .await
        .expect("submit grade");
    let body = test_support::read_json(response).await;
    let student_id = body["student"]["id"].as_str().expect("student id").to_string();
    let assignment_id =
        body["assignment"]["assignment"]["id"].as_str().expect("assignment id").to_string();
    (student_id, assignment_id)
}

#[tokio::test]
async fn dashboard_summarises_seeded_student() {
    let ctx = test_support::setup_test_context().await;
    let alex = seeded_student_id(&ctx, "Alex Johnson").await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/students/{alex}"),
            Some(test_support::STUDENT_EMAIL),
            None,
        ))
        .await
        .expect("dashboard");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["student"]["name"], "Alex Johnson");
    assert_eq!(body["grades"].as_array().map(Vec::len), Some(7));
    assert_eq!(body["best_subject"], "Science");
    assert_eq!(body["open_assignments"], 0);
    let average = body["average_grade"].as_f64().expect("average");
    assert!((average - 86.857).abs() < 0.01, "average {average}");
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/students/missing",
            Some(test_support::TEACHER_EMAIL),
            None,
        ))
        .await
        .expect("dashboard");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn progress_points_are_ordered_by_date() {
    let ctx = test_support::setup_test_context().await;
    let alex = seeded_student_id(&ctx, "Alex Johnson").await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/students/{alex}/progress"),
            Some(test_support::TEACHER_EMAIL),
            None,
        ))
        .await
        .expect("progress");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    let points = body.as_array().expect("points");
    let dates: Vec<&str> = points.iter().filter_map(|p| p["date"].as_str()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert_eq!(points[0]["date"], "2023-09-15");
    assert_eq!(points[0]["math"], 85);
}

#[tokio::test]
async fn overview_and_lookup_are_teacher_only() {
    let ctx = test_support::setup_test_context().await;
    seeded_student_id(&ctx, "Maria Garcia").await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/students",
            Some(test_support::STUDENT_EMAIL),
            None,
        ))
        .await
        .expect("overview");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/students",
            Some(test_support::TEACHER_EMAIL),
            None,
        ))
        .await
        .expect("overview");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    let names: Vec<&str> =
        body.as_array().expect("rows").iter().filter_map(|r| r["student"]["name"].as_str()).collect();
    assert_eq!(names, vec!["Alex Johnson", "Chen Wei", "Maria Garcia"]);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/students/lookup?roll_number=Z-404",
            Some(test_support::TEACHER_EMAIL),
            None,
        ))
        .await
        .expect("lookup");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lookup_finds_student_by_roll_number() {
    let ctx = test_support::setup_test_context().await;
    let (student_id, _) = grade_with_assignment(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/students/lookup?roll_number=M-7",
            Some(test_support::TEACHER_EMAIL),
            None,
        ))
        .await
        .expect("lookup");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["id"], student_id.as_str());
    assert_eq!(body["name"], "Sam Okafor");
}

#[tokio::test]
async fn assignment_can_be_attempted_and_completed_twice() {
    let ctx = test_support::setup_test_context().await;
    let (student_id, assignment_id) = grade_with_assignment(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/students/{student_id}/assignments"),
            Some(test_support::STUDENT_EMAIL),
            None,
        ))
        .await
        .expect("assignments");
    let body = test_support::read_json(response).await;
    let questions = body[0]["questions"].as_array().expect("questions");
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["correctAnswer"], "B");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("/api/v1/students/{student_id}/assignments/{assignment_id}/attempts"),
            Some(test_support::STUDENT_EMAIL),
            Some(json!({ "answers": ["b", "C"] })),
        ))
        .await
        .expect("attempt");
    assert_eq!(response.status(), StatusCode::OK);
    let attempt = test_support::read_json(response).await;
    assert_eq!(attempt["correctCount"], 1);
    assert_eq!(attempt["total"], 2);
    assert_eq!(attempt["score"], 50.0);

    let uri = format!("/api/v1/students/{student_id}/assignments/{assignment_id}/complete");
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &uri,
            Some(test_support::STUDENT_EMAIL),
            None,
        ))
        .await
        .expect("complete");
    assert_eq!(response.status(), StatusCode::OK);
    let first = test_support::read_json(response).await;
    assert_eq!(first["status"], "completed");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &uri,
            Some(test_support::STUDENT_EMAIL),
            None,
        ))
        .await
        .expect("complete again");
    let second = test_support::read_json(response).await;
    assert_eq!(second["completed_at"], first["completed_at"]);
}

#[tokio::test]
async fn completing_another_students_assignment_is_not_found() {
    let ctx = test_support::setup_test_context().await;
    let (_, assignment_id) = grade_with_assignment(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("/api/v1/students/someone-else/assignments/{assignment_id}/complete"),
            Some(test_support::STUDENT_EMAIL),
            None,
        ))
        .await
        .expect("complete");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn activity_feed_names_the_student() {
    let ctx = test_support::setup_test_context().await;
    grade_with_assignment(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/activity",
            Some(test_support::TEACHER_EMAIL),
            None,
        ))
        .await
        .expect("activity");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body[0]["student_name"], "Sam Okafor");
    assert_eq!(body[0]["subject_name"], "Mathematics");
    assert_eq!(body[0]["status"], "pending");
}
