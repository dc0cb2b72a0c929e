//! Chat screen exchange runner.

use std::sync::Arc;
use std::time::Instant;

use waypoint_api::chatbot::{ChatReply, ChatbotClient};
use waypoint_api::error::ApiError;
use waypoint_api::types::ChatHistoryMessage;
use waypoint_core::recording::{ChatInteraction, InteractionRecord};

use crate::controller::RecordingController;

/// Runs chat exchanges and records them while a session is active.
#[derive(Clone)]
pub struct ChatProducer {
    client: ChatbotClient,
    recorder: Arc<RecordingController>,
}

impl ChatProducer {
    pub fn new(client: ChatbotClient, recorder: Arc<RecordingController>) -> Self {
        Self { client, recorder }
    }

    /// Sends one chat message and returns the AI reply.
    ///
    /// `route` is the current navigation route; the recorder resolves the
    /// capability from it at log time.
    pub async fn send(
        &self,
        route: &str,
        message: &str,
        history: &[ChatHistoryMessage],
        user_id: Option<i64>,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply, ApiError> {
        let started = Instant::now();
        let reply = self
            .client
            .send_message(message, history, user_id, conversation_id)
            .await?;
        let response_time_ms = started.elapsed().as_millis() as u64;

        if let Some(ai_response) = &reply.reply {
            let record = InteractionRecord::Chat(ChatInteraction {
                user_message: message.to_string(),
                ai_response: ai_response.clone(),
                response_time_ms,
                conversation_id: reply
                    .conversation_id
                    .clone()
                    .or_else(|| conversation_id.map(str::to_string)),
            });
            super::log_best_effort(&self.recorder, route, record).await;
        }

        Ok(reply)
    }
}
