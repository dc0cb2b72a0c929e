//! Career suggestion wizard exchange runner.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use waypoint_api::error::ApiError;
use waypoint_api::suggester::{SuggesterClient, SuggesterStep};
use waypoint_api::types::SurveyQuestion;
use waypoint_core::recording::{InteractionRecord, SuggestionInteraction};

use crate::controller::RecordingController;

/// Runs suggestion wizard steps and records each question/answer pair.
#[derive(Clone)]
pub struct SuggestionProducer {
    client: SuggesterClient,
    recorder: Arc<RecordingController>,
}

impl SuggestionProducer {
    pub fn new(client: SuggesterClient, recorder: Arc<RecordingController>) -> Self {
        Self { client, recorder }
    }

    /// Fetches the first wizard question. Nothing is recorded yet — no
    /// exchange has happened.
    pub async fn start(&self) -> Result<SuggesterStep, ApiError> {
        self.client.start().await
    }

    /// Submits one answer and returns the next step.
    ///
    /// Each answered question is recorded; the final step additionally
    /// carries the produced suggestions and the full answer set.
    pub async fn answer(
        &self,
        route: &str,
        question: &SurveyQuestion,
        answer: &str,
        question_index: u32,
        answers_so_far: &HashMap<String, String>,
    ) -> Result<SuggesterStep, ApiError> {
        let started = Instant::now();
        let step = self
            .client
            .answer(answer, question_index, answers_so_far)
            .await?;
        let response_time_ms = started.elapsed().as_millis() as u64;

        let record = if step.is_final() {
            InteractionRecord::CareerSuggestion(SuggestionInteraction {
                question: question.text.clone(),
                answer: answer.to_string(),
                question_index,
                response_time_ms,
                suggestions: step.suggestions.clone(),
                all_answers: step.final_answers.clone(),
                is_final: true,
            })
        } else {
            InteractionRecord::CareerSuggestion(SuggestionInteraction {
                question: question.text.clone(),
                answer: answer.to_string(),
                question_index,
                response_time_ms,
                suggestions: None,
                all_answers: None,
                is_final: false,
            })
        };
        super::log_best_effort(&self.recorder, route, record).await;

        Ok(step)
    }
}
