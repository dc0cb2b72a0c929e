//! Course recommendation survey exchange runner.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use waypoint_api::error::ApiError;
use waypoint_api::recommender::{RecommendationResult, RecommendationSurvey, RecommenderClient};
use waypoint_core::recording::{InteractionRecord, RecommendationInteraction};

use crate::controller::RecordingController;

/// Runs recommendation surveys and records each completed one.
#[derive(Clone)]
pub struct RecommendationProducer {
    client: RecommenderClient,
    recorder: Arc<RecordingController>,
}

impl RecommendationProducer {
    pub fn new(client: RecommenderClient, recorder: Arc<RecordingController>) -> Self {
        Self { client, recorder }
    }

    /// Starts a recommendation request and returns the survey. Nothing is
    /// recorded yet — the exchange completes at submit time.
    pub async fn start(
        &self,
        keywords: &str,
        location: &str,
    ) -> Result<RecommendationSurvey, ApiError> {
        self.client.start(keywords, location).await
    }

    /// Submits survey answers and records the completed exchange with the
    /// resulting recommendation list.
    pub async fn submit(
        &self,
        route: &str,
        keywords: &str,
        location: &str,
        request_id: &str,
        answers: &HashMap<String, String>,
    ) -> Result<RecommendationResult, ApiError> {
        let started = Instant::now();
        let result = self.client.submit(request_id, answers).await?;
        let response_time_ms = started.elapsed().as_millis() as u64;

        let courses = result.recommendations.clone().unwrap_or_default();
        let record = InteractionRecord::CourseRecommendation(RecommendationInteraction {
            keywords: keywords.to_string(),
            location: location.to_string(),
            survey_answers: answers.clone(),
            total_recommendations: courses.len() as u64,
            courses,
            response_time_ms,
        });
        super::log_best_effort(&self.recorder, route, record).await;

        Ok(result)
    }
}
