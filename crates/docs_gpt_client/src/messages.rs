//! HTTP message types for the question-answering service. Client ↔ server JSON.

use serde::{Deserialize, Serialize};

/// Client → server: `POST /predict` body.
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest<'a> {
    pub text: &'a str,
}

impl<'a> PredictRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

/// Server → client: answer to one question.
///
/// Exactly three fields. A missing field or an unexpected extra one fails
/// deserialization instead of leaving the record half-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerPayload {
    /// The question as the server received it.
    pub question: String,
    pub answer: String,
    /// Documentation page the answer was drawn from.
    pub url: String,
}

/// Server → client: `GET /` health probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub health_check: String,
    pub model_version: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.health_check.eq_ignore_ascii_case("ok")
    }
}
