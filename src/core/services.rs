//! Implementations for the service the app needs.
//!

use crate::core::assistant::{ReplyDispatcher, Submission};
use crate::core::model::{Message, Reply};
use crate::core::traits::ConversationService;
use crate::error::AppResult;
use crate::infrastructure::entities::Conversation;
use crate::infrastructure::traits::ConversationRepository;
use async_trait::async_trait;
use di::{Ref, injectable};
use log::{debug, info};
use uuid::Uuid;

pub const WELCOME_TEXT: &str = "Hello! I'm your AI Business Assistant. I can help you analyze your sales data, predict trends, and suggest marketing strategies. Try asking me about your best-selling products, revenue forecasts, or marketing ideas for upcoming festivals.";

#[injectable(ConversationService)]
pub struct AssistantConversationService {
    repo: Ref<dyn ConversationRepository>,
    dispatcher: Ref<ReplyDispatcher>,
}

#[async_trait]
impl ConversationService for AssistantConversationService {
    async fn list_conversations(&self) -> Vec<Conversation> {
        self.repo.list_conversations().await
    }

    async fn create_conversation(&self) -> Conversation {
        let conversation = self
            .repo
            .create_conversation(Conversation::new(Message::assistant(Reply::text(
                WELCOME_TEXT,
            ))))
            .await;

        info!("created conversation {}", conversation.id);
        conversation
    }

    async fn delete_conversation(&self, conversation_id: Uuid) -> AppResult<()> {
        self.repo.delete_conversation(conversation_id).await?;
        self.dispatcher.close(conversation_id).await;

        info!("deleted conversation {conversation_id}");
        Ok(())
    }

    async fn list_messages(&self, conversation_id: Uuid) -> AppResult<Vec<Message>> {
        self.repo.list_conversation_messages(conversation_id).await
    }

    async fn is_pending(&self, conversation_id: Uuid) -> AppResult<bool> {
        self.repo
            .get_conversation(conversation_id)
            .await
            .map(|c| c.is_pending())
    }

    async fn submit(&self, conversation_id: Uuid, query: String) -> AppResult<Option<Submission>> {
        if query.trim().is_empty() {
            debug!("ignoring blank query for conversation {conversation_id}");
            // Still report unknown conversations.
            self.repo.get_conversation(conversation_id).await?;
            return Ok(None);
        }

        self.dispatcher
            .submit(conversation_id, query)
            .await
            .map(Some)
    }
}
