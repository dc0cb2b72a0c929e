//! AI capability types and route resolution.
//!
//! The platform exposes three AI-backed features. Which one is active is
//! derived from the current navigation route, never cached across navigation:
//! the recorder resolves the capability at the moment an interaction is
//! logged, not when recording starts.

use serde::{Deserialize, Serialize};

/// Route served by the chat screen.
pub const CHAT_ROUTE: &str = "/chatbot";
/// Route served by the career suggestion wizard.
pub const CAREER_SUGGESTER_ROUTE: &str = "/career-suggester";
/// Route served by the course recommendation survey.
pub const COURSE_RECOMMENDER_ROUTE: &str = "/course-recommender";

/// One of the three AI-backed features the platform offers.
///
/// Serialized with the wire names the backend expects in `ai_type` fields
/// and report keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Free-form career chat.
    #[serde(rename = "chatbot")]
    Chat,
    /// Question/answer wizard producing career suggestions.
    #[serde(rename = "career_suggester")]
    CareerSuggestion,
    /// Survey producing a ranked course list.
    #[serde(rename = "course_recommender")]
    CourseRecommendation,
}

impl Capability {
    /// Resolves the capability for a navigation route.
    ///
    /// Pure function: the same route always resolves to the same capability.
    /// Routes outside the three AI screens resolve to `None`.
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            CHAT_ROUTE => Some(Self::Chat),
            CAREER_SUGGESTER_ROUTE => Some(Self::CareerSuggestion),
            COURSE_RECOMMENDER_ROUTE => Some(Self::CourseRecommendation),
            _ => None,
        }
    }

    /// The wire name used in request bodies and report keys.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Chat => "chatbot",
            Self::CareerSuggestion => "career_suggester",
            Self::CourseRecommendation => "course_recommender",
        }
    }

    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Chat => "Chatbot AI",
            Self::CareerSuggestion => "Career Suggester AI",
            Self::CourseRecommendation => "Course Recommender AI",
        }
    }

    /// Parses a wire name back into a capability.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "chatbot" => Some(Self::Chat),
            "career_suggester" => Some(Self::CareerSuggestion),
            "course_recommender" => Some(Self::CourseRecommendation),
            _ => None,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}
