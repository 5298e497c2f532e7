//! Best-effort parsing of generated quiz text.
//!
//! The expected shape is a numbered question line, lettered option lines and a
//! trailing `Correct Answer: X` line:
//!
//! ```text
//! 1. What is 2 + 2?
//! A) 3
//! B) 4
//! Correct Answer: B
//! ```
//!
//! Blocks that do not fit are dropped silently.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct QuizOption {
    pub(crate) letter: String,
    pub(crate) text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizQuestion {
    pub(crate) question: String,
    pub(crate) options: Vec<QuizOption>,
    pub(crate) correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionResult {
    pub(crate) index: usize,
    pub(crate) selected: Option<String>,
    pub(crate) correct_answer: String,
    pub(crate) is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizAttempt {
    pub(crate) score: f64,
    pub(crate) correct_count: usize,
    pub(crate) total: usize,
    pub(crate) results: Vec<QuestionResult>,
}

fn question_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+\.").expect("question start pattern"))
}

fn question_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+\.\s*").expect("question prefix pattern"))
}

fn option_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-D])\)\s*(.*)").expect("option pattern"))
}

fn answer_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Correct Answer:\s*([A-D])").expect("answer pattern"))
}

/// Splits `text` into question blocks; a block starts at every line that begins
/// with `<digits>.`. Leading text before the first numbered line forms its own block.
fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in text.lines() {
        match blocks.last_mut() {
            Some(current) if !question_start().is_match(line) => current.push(line),
            _ => blocks.push(vec![line]),
        }
    }

    blocks
        .into_iter()
        .map(|lines| lines.join("\n"))
        .filter(|block| !block.trim().is_empty())
        .collect()
}

fn parse_block(block: &str) -> Option<QuizQuestion> {
    let lines: Vec<&str> = block.trim().lines().collect();
    let (first, rest) = lines.split_first()?;
    let question = question_prefix().replace(first, "").into_owned();

    let (last, middle) = match rest.split_last() {
        Some((last, middle)) => (*last, middle),
        None => (*first, &[][..]),
    };

    let options: Vec<QuizOption> = middle
        .iter()
        .filter_map(|line| option_line().captures(line))
        .map(|caps| QuizOption { letter: caps[1].to_string(), text: caps[2].to_string() })
        .collect();

    let correct_answer = answer_line()
        .captures(last)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    if question.is_empty() || options.is_empty() || correct_answer.is_empty() {
        return None;
    }

    Some(QuizQuestion { question, options, correct_answer })
}

pub(crate) fn parse_quiz(text: &str) -> Vec<QuizQuestion> {
    split_blocks(text).iter().filter_map(|block| parse_block(block)).collect()
}

/// Scores answers by position; a missing or blank answer counts as wrong.
pub(crate) fn score_answers(questions: &[QuizQuestion], answers: &[String]) -> QuizAttempt {
    let results: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = answers
                .get(index)
                .map(|answer| answer.trim().to_ascii_uppercase())
                .filter(|answer| !answer.is_empty());
            let is_correct = selected.as_deref() == Some(question.correct_answer.as_str());
            QuestionResult {
                index,
                selected,
                correct_answer: question.correct_answer.clone(),
                is_correct,
            }
        })
        .collect();

    let total = results.len();
    let correct_count = results.iter().filter(|result| result.is_correct).count();
    let score = if total == 0 { 0.0 } else { correct_count as f64 / total as f64 * 100.0 };

    QuizAttempt { score, correct_count, total, results }
}
