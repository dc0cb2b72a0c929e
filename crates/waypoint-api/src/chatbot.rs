//! Typed client for the chatbot endpoints.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::types::ChatHistoryMessage;

#[derive(Debug, Serialize)]
struct ChatMessageRequest<'a> {
    message: &'a str,
    history: &'a [ChatHistoryMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<&'a str>,
}

/// Reply to a chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
    /// Rolling history window maintained by the backend.
    #[serde(default)]
    pub history_update: Vec<ChatHistoryMessage>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Summary row for a stored conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationSummary {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub chat_title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConversationsResponse {
    #[serde(default)]
    conversations: Vec<ConversationSummary>,
}

/// Client for the chatbot endpoints.
#[derive(Clone)]
pub struct ChatbotClient {
    gateway: Arc<Gateway>,
}

impl ChatbotClient {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Sends one chat message and returns the AI reply.
    ///
    /// Calls `POST /api/chatbot/message` (authenticated).
    pub async fn send_message(
        &self,
        message: &str,
        history: &[ChatHistoryMessage],
        user_id: Option<i64>,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply, ApiError> {
        let request = ChatMessageRequest {
            message,
            history,
            user_id,
            conversation_id,
        };
        self.gateway
            .post_json("POST /chatbot/message", "api/chatbot/message", &request, true)
            .await
    }

    /// Lists the user's stored conversations.
    ///
    /// Calls `GET /api/chatbot/conversations` (authenticated).
    pub async fn conversations(&self, user_id: i64) -> Result<Vec<ConversationSummary>, ApiError> {
        let response: ConversationsResponse = self
            .gateway
            .get_json(
                "GET /chatbot/conversations",
                "api/chatbot/conversations",
                &[("user_id", user_id.to_string())],
                true,
            )
            .await?;
        Ok(response.conversations)
    }

    /// Deletes a stored conversation.
    ///
    /// Calls `DELETE /api/chatbot/conversations/{id}` (authenticated).
    pub async fn delete_conversation(
        &self,
        conversation_id: &str,
        user_id: i64,
    ) -> Result<(), ApiError> {
        let endpoint = format!("DELETE /chatbot/conversations/{conversation_id}");
        let _: serde_json::Value = self
            .gateway
            .delete_json(
                &endpoint,
                &format!("api/chatbot/conversations/{conversation_id}"),
                &[("user_id", user_id.to_string())],
                true,
            )
            .await?;
        Ok(())
    }
}
