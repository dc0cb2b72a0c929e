//! Interaction record types.
//!
//! One record is captured per user/AI exchange while recording is active.
//! Records are immutable once constructed; ownership transfers to the
//! backend on submission and the client retains no copy.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::capability::Capability;

/// One chat exchange: the user's message and the AI reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatInteraction {
    pub user_message: String,
    pub ai_response: String,
    /// Wall-clock time from request dispatch to response receipt.
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// One step of the career suggestion wizard.
///
/// Intermediate steps carry only the question/answer pair; the final step
/// additionally carries the produced suggestions and the full answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionInteraction {
    pub question: String,
    pub answer: String,
    pub question_index: u32,
    /// Wall-clock time from request dispatch to response receipt.
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_answers: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_final: bool,
}

/// One completed course recommendation survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationInteraction {
    pub keywords: String,
    pub location: String,
    pub survey_answers: HashMap<String, String>,
    pub courses: Vec<Value>,
    /// Wall-clock time from request dispatch to response receipt.
    pub response_time_ms: u64,
    pub total_recommendations: u64,
}

/// One observed user/AI exchange, tagged by capability.
///
/// Serializes untagged: the wire carries the capability separately in the
/// `ai_type` field, and the record body is the free-form `interaction`
/// payload the backend stores verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InteractionRecord {
    Chat(ChatInteraction),
    CareerSuggestion(SuggestionInteraction),
    CourseRecommendation(RecommendationInteraction),
}

impl InteractionRecord {
    /// The capability this record belongs to.
    pub fn capability(&self) -> Capability {
        match self {
            Self::Chat(_) => Capability::Chat,
            Self::CareerSuggestion(_) => Capability::CareerSuggestion,
            Self::CourseRecommendation(_) => Capability::CourseRecommendation,
        }
    }

    /// The measured response time for this exchange, in milliseconds.
    pub fn response_time_ms(&self) -> u64 {
        match self {
            Self::Chat(c) => c.response_time_ms,
            Self::CareerSuggestion(s) => s.response_time_ms,
            Self::CourseRecommendation(r) => r.response_time_ms,
        }
    }
}
