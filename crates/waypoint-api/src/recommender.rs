//! Typed client for the course recommender endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::types::SurveyQuestion;

#[derive(Debug, Serialize)]
struct StartRequest<'a> {
    keywords: &'a str,
    location: &'a str,
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    request_id: &'a str,
    answers: &'a HashMap<String, String>,
}

/// Survey returned by the recommendation start step.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSurvey {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub job_count: Option<u64>,
    #[serde(default)]
    pub questions: Vec<SurveyQuestion>,
    pub request_id: String,
}

/// Final recommendation list for a completed survey.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationResult {
    #[serde(default)]
    pub recommendations: Option<Vec<Value>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the recommender endpoints.
#[derive(Clone)]
pub struct RecommenderClient {
    gateway: Arc<Gateway>,
}

impl RecommenderClient {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Starts a recommendation request and returns the survey to answer.
    ///
    /// Calls `POST /api/recommender/start`.
    pub async fn start(
        &self,
        keywords: &str,
        location: &str,
    ) -> Result<RecommendationSurvey, ApiError> {
        let request = StartRequest { keywords, location };
        self.gateway
            .post_json("POST /recommender/start", "api/recommender/start", &request, false)
            .await
    }

    /// Submits survey answers and returns the recommendation list.
    ///
    /// Calls `POST /api/recommender/submit`.
    pub async fn submit(
        &self,
        request_id: &str,
        answers: &HashMap<String, String>,
    ) -> Result<RecommendationResult, ApiError> {
        let request = SubmitRequest { request_id, answers };
        self.gateway
            .post_json("POST /recommender/submit", "api/recommender/submit", &request, false)
            .await
    }
}
