use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::quiz::QuizQuestion;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SessionContentRequest {
    #[validate(length(min = 3, max = 2000, message = "prompt must be 3-2000 characters"))]
    pub(crate) prompt: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ClarifyRequest {
    #[validate(length(min = 2, max = 500, message = "concept must be 2-500 characters"))]
    pub(crate) concept: String,
    #[validate(length(min = 1, max = 100, message = "subject must be 1-100 characters"))]
    pub(crate) subject: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClarifyResponse {
    pub(crate) explanation: String,
    pub(crate) quiz: String,
    pub(crate) questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct QueryRequest {
    #[validate(length(min = 3, max = 1000, message = "question must be 3-1000 characters"))]
    pub(crate) question: String,
    #[validate(length(min = 1, max = 100, message = "subject must be 1-100 characters"))]
    pub(crate) subject: String,
}
