//! Prompt templates for every generation feature plus the decode step that
//! turns a raw completion into a typed value.

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::{metrics, reference::ReferenceData, time::format_date};
use crate::db::models::Grade;
use crate::services::ai_client::{GenerationRequest, GeneratorError, ResponseFormat, TextGenerator};

pub(crate) const INVALID_RESPONSE_MESSAGE: &str =
    "The AI returned an invalid response. Please try again.";

const QUIZ_FORMAT_RULES: &str = "Write the quiz as plain text. Number each question (\"1.\", \"2.\", ...) \
on its own line, put each option on its own line as \"A) ...\" through \"D) ...\", and finish every \
question with a line \"Correct Answer: <letter>\".";

#[derive(Debug, Error)]
pub(crate) enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    Syntax(serde_json::Error),
    #[error("response is not a JSON object")]
    NotAnObject,
    #[error("response is missing field '{0}'")]
    MissingField(&'static str),
    #[error("response fields have the wrong shape: {0}")]
    Shape(serde_json::Error),
}

#[derive(Debug, Error)]
pub(crate) enum FlowError {
    #[error("The AI returned an invalid response. Please try again.")]
    InvalidResponse(#[source] DecodeError),
    #[error(transparent)]
    Upstream(#[from] GeneratorError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SchemaConstrained,
    FreeText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GeneratedAssignment {
    pub(crate) quiz: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ConceptClarification {
    pub(crate) explanation: String,
    pub(crate) quiz: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StudentAnswer {
    pub(crate) answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionContent {
    pub(crate) session_title: String,
    pub(crate) session_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PerformanceInsights {
    pub(crate) summary: String,
    pub(crate) strengths: Vec<String>,
    pub(crate) areas_for_improvement: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GradeForPrompt<'a> {
    subject: String,
    grade: i32,
    feedback: &'a str,
    date: String,
}

/// Removes a surrounding markdown fence (```` ```json ```` or ```` ``` ````) and trims.
pub(crate) fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json").or_else(|| text.strip_prefix("```")) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parses `raw` as a JSON object that must carry every key in `fields`.
pub(crate) fn decode<T: DeserializeOwned>(
    raw: &str,
    fields: &[&'static str],
) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_str(raw).map_err(DecodeError::Syntax)?;
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;
    if let Some(missing) = fields.iter().find(|field| !object.contains_key(**field)) {
        return Err(DecodeError::MissingField(*missing));
    }
    serde_json::from_value(value).map_err(DecodeError::Shape)
}

fn json_instruction(fields: &[&str]) -> String {
    let keys = fields.iter().map(|field| format!("\"{field}\"")).collect::<Vec<_>>().join(", ");
    format!("Respond with a single JSON object containing exactly these keys: {keys}.")
}

async fn run<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    flow: &'static str,
    system: &str,
    prompt: String,
    mode: Mode,
    fields: &'static [&'static str],
) -> Result<T, FlowError> {
    let timer = Instant::now();
    let format = match mode {
        Mode::SchemaConstrained => ResponseFormat::JsonObject { fields },
        Mode::FreeText => ResponseFormat::Text,
    };
    let system = match mode {
        Mode::SchemaConstrained => format!("{system}\n\n{}", json_instruction(fields)),
        Mode::FreeText => system.to_string(),
    };

    let raw = match generator.generate(GenerationRequest { flow, system, prompt, format }).await {
        Ok(raw) => raw,
        Err(err) => {
            metrics::record_ai_request(flow, "upstream_error", timer.elapsed().as_secs_f64());
            tracing::error!(flow, error = %err, "AI generation failed");
            return Err(FlowError::Upstream(err));
        }
    };

    let body = match mode {
        Mode::SchemaConstrained => raw.trim(),
        Mode::FreeText => strip_code_fences(&raw),
    };

    match decode::<T>(body, fields) {
        Ok(value) => {
            metrics::record_ai_request(flow, "ok", timer.elapsed().as_secs_f64());
            Ok(value)
        }
        Err(err) => {
            metrics::record_ai_request(flow, "invalid_response", timer.elapsed().as_secs_f64());
            tracing::warn!(flow, error = %err, raw = %raw, "Failed to decode AI response");
            Err(FlowError::InvalidResponse(err))
        }
    }
}

pub(crate) async fn generate_assignment(
    generator: &dyn TextGenerator,
    subject: &str,
    feedback: &str,
) -> Result<GeneratedAssignment, FlowError> {
    let prompt = format!(
        "Subject: {subject}\nTeacher's Feedback: \"{feedback}\"\n\n\
         Based on the feedback, create a multiple-choice quiz with 3-5 questions that will test \
         the student's understanding of the key concepts they need to work on. For each question, \
         provide four options (A, B, C, D) and indicate the correct answer.\n\n{QUIZ_FORMAT_RULES}"
    );
    run(
        generator,
        "generate_assignment",
        "You are an expert tutor. Your task is to create a quiz for a student based on feedback \
         from their teacher for a specific subject. The quiz should help the student improve on \
         the areas mentioned in the feedback.",
        prompt,
        Mode::SchemaConstrained,
        &["quiz"],
    )
    .await
}

pub(crate) async fn clarify_concept(
    generator: &dyn TextGenerator,
    concept: &str,
    subject: &str,
) -> Result<ConceptClarification, FlowError> {
    let prompt = format!(
        "Subject: {subject}\nConcept: {concept}\n\n\
         First, provide a detailed explanation of the concept, tailored to the given subject. \
         Then, create a quiz with multiple-choice questions to assess understanding.\n\n\
         {QUIZ_FORMAT_RULES}"
    );
    run(
        generator,
        "clarify_concept",
        "You are an expert tutor. Your task is to clarify a given concept within a specific \
         subject and generate a quiz to test the student's understanding.",
        prompt,
        Mode::SchemaConstrained,
        &["explanation", "quiz"],
    )
    .await
}

pub(crate) async fn answer_student_query(
    generator: &dyn TextGenerator,
    question: &str,
    subject: &str,
) -> Result<StudentAnswer, FlowError> {
    let prompt = format!(
        "Subject: {subject}\nQuestion: {question}\n\n\
         Answer the question in a way that is easy to understand for a student."
    );
    run(
        generator,
        "student_query",
        "You are an expert tutor for the given subject. Your task is to provide a clear and \
         detailed answer to the student's question.",
        prompt,
        Mode::SchemaConstrained,
        &["answer"],
    )
    .await
}

pub(crate) async fn generate_session_content(
    generator: &dyn TextGenerator,
    request: &str,
) -> Result<SessionContent, FlowError> {
    let prompt = format!(
        "Prompt: \"{request}\"\n\n\
         The HTML should be well-structured and styled for readability. Use <h1> for the main \
         topic, <h2> for sub-sections, <p> for explanations, <ul> or <ol> with <li> for lists, \
         and <strong> or <em> for emphasis.\n\
         Provide a clear and simple explanation of the topic suitable for a school student.\n\
         If the prompt asks for questions or a quiz, include them in a separate section.\n\
         Put the HTML in \"sessionContent\" and a suitable title in \"sessionTitle\"."
    );
    run(
        generator,
        "session_content",
        "You are an expert curriculum designer. A teacher has provided a prompt. Generate an \
         HTML page with educational content based on it, and a suitable title for the content.",
        prompt,
        Mode::SchemaConstrained,
        &["sessionTitle", "sessionContent"],
    )
    .await
}

pub(crate) async fn performance_insights(
    generator: &dyn TextGenerator,
    reference: &ReferenceData,
    student_name: &str,
    grades: &[Grade],
) -> Result<PerformanceInsights, FlowError> {
    let rows: Vec<GradeForPrompt<'_>> = grades
        .iter()
        .map(|grade| GradeForPrompt {
            subject: reference.subject_name_or_unknown(&grade.subject_id),
            grade: grade.grade,
            feedback: &grade.feedback,
            date: format_date(grade.date),
        })
        .collect();
    let data = serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string());

    let prompt = format!(
        "Student Name: {student_name}\nPerformance Data (JSON format):\n{data}\n\n\
         Based on this data, provide a concise analysis. Identify the student's key strengths \
         and areas for improvement.\n\
         Your response MUST be a single, valid JSON object with three keys: \"summary\", \
         \"strengths\", and \"areasForImprovement\".\n\n\
         - \"summary\": A brief, one-paragraph summary of the student's overall performance.\n\
         - \"strengths\": An array of strings, each describing a specific strength (e.g., \
         \"Excellent scores in Science\").\n\
         - \"areasForImprovement\": An array of strings, each highlighting an area that needs \
         attention (e.g., \"Needs to focus on literary analysis in English\")."
    );
    run(
        generator,
        "performance_insights",
        "You are an expert educational analyst. A teacher needs insights into a student's \
         performance. Analyze the provided data, which includes grades and teacher feedback for \
         various subjects.",
        prompt,
        Mode::FreeText,
        &["summary", "strengths", "areasForImprovement"],
    )
    .await
}
