//! Typed client for the career suggester wizard endpoints.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::types::SurveyQuestion;

#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
    answer: &'a str,
    current_question_index: u32,
    answers_so_far: &'a HashMap<String, String>,
}

/// One step of the suggestion wizard.
///
/// Intermediate steps carry `next_question`; the final step carries
/// `suggestions` and `final_answers` with `next_question` absent.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SuggesterStep {
    #[serde(default)]
    pub next_question: Option<SurveyQuestion>,
    #[serde(default)]
    pub answers_so_far: HashMap<String, String>,
    #[serde(default)]
    pub current_question_index: Option<u32>,
    #[serde(default)]
    pub suggestions: Option<Value>,
    #[serde(default)]
    pub final_answers: Option<HashMap<String, String>>,
}

impl SuggesterStep {
    /// Whether the wizard has finished and produced suggestions.
    pub fn is_final(&self) -> bool {
        self.next_question.is_none()
    }
}

/// Client for the suggester endpoints.
#[derive(Clone)]
pub struct SuggesterClient {
    gateway: Arc<Gateway>,
}

impl SuggesterClient {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Starts a suggestion wizard and returns the first question.
    ///
    /// Calls `GET /api/suggester/start`.
    pub async fn start(&self) -> Result<SuggesterStep, ApiError> {
        self.gateway
            .get_json("GET /suggester/start", "api/suggester/start", &[], false)
            .await
    }

    /// Submits one answer and returns the next step (or the final
    /// suggestions).
    ///
    /// Calls `POST /api/suggester/answer`.
    pub async fn answer(
        &self,
        answer: &str,
        current_question_index: u32,
        answers_so_far: &HashMap<String, String>,
    ) -> Result<SuggesterStep, ApiError> {
        let request = AnswerRequest {
            answer,
            current_question_index,
            answers_so_far,
        };
        self.gateway
            .post_json("POST /suggester/answer", "api/suggester/answer", &request, false)
            .await
    }
}
