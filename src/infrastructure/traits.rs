//! Infrastructure traits, used for DI on higher levels

use crate::core::model::Message;
use crate::error::AppResult;
use crate::infrastructure::entities;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn list_conversations(&self) -> Vec<entities::Conversation>;

    async fn create_conversation(
        &self,
        conversation: entities::Conversation,
    ) -> entities::Conversation;

    async fn get_conversation(&self, conversation_id: Uuid) -> AppResult<entities::Conversation>;

    async fn delete_conversation(&self, conversation_id: Uuid) -> AppResult<()>;

    async fn list_conversation_messages(&self, conversation_id: Uuid) -> AppResult<Vec<Message>>;

    /// Appends a user message and counts one more outstanding reply.
    async fn append_user_message(&self, conversation_id: Uuid, message: Message) -> AppResult<()>;

    /// Appends an assistant reply and settles one outstanding reply.
    async fn complete_reply(&self, conversation_id: Uuid, message: Message) -> AppResult<()>;
}
