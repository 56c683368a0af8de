//! In-memory repository. Conversations live as long as the process.

use crate::core::model::Message;
use crate::error::{AppError, AppResult};
use crate::infrastructure::entities::Conversation;
use crate::infrastructure::traits::ConversationRepository;
use async_trait::async_trait;
use di::{inject, injectable};
use log::debug;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryConversationRepository {
    conversations: RwLock<HashMap<Uuid, Conversation>>,
}

#[injectable(ConversationRepository)]
impl InMemoryConversationRepository {
    #[inject]
    pub fn create() -> InMemoryConversationRepository {
        InMemoryConversationRepository {
            conversations: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn list_conversations(&self) -> Vec<Conversation> {
        let mut conversations: Vec<_> = self.conversations.read().await.values().cloned().collect();
        conversations.sort_by_key(|c| (c.created_at, c.id));
        conversations
    }

    async fn create_conversation(&self, conversation: Conversation) -> Conversation {
        self.conversations
            .write()
            .await
            .insert(conversation.id, conversation.clone());
        conversation
    }

    async fn get_conversation(&self, conversation_id: Uuid) -> AppResult<Conversation> {
        self.conversations
            .read()
            .await
            .get(&conversation_id)
            .cloned()
            .ok_or(AppError::ConversationNotFound(conversation_id))
    }

    async fn delete_conversation(&self, conversation_id: Uuid) -> AppResult<()> {
        self.conversations
            .write()
            .await
            .remove(&conversation_id)
            .map(|_| ())
            .ok_or(AppError::ConversationNotFound(conversation_id))
    }

    async fn list_conversation_messages(&self, conversation_id: Uuid) -> AppResult<Vec<Message>> {
        self.get_conversation(conversation_id)
            .await
            .map(|c| c.messages)
    }

    async fn append_user_message(&self, conversation_id: Uuid, message: Message) -> AppResult<()> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .get_mut(&conversation_id)
            .ok_or(AppError::ConversationNotFound(conversation_id))?;

        conversation.messages.push(message);
        conversation.pending_replies += 1;
        Ok(())
    }

    async fn complete_reply(&self, conversation_id: Uuid, message: Message) -> AppResult<()> {
        let mut conversations = self.conversations.write().await;
        let Some(conversation) = conversations.get_mut(&conversation_id) else {
            debug!("dropping reply {} for deleted conversation {conversation_id}", message.id());
            return Err(AppError::ConversationNotFound(conversation_id));
        };

        conversation.messages.push(message);
        conversation.pending_replies = conversation.pending_replies.saturating_sub(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::classify_and_respond;

    #[tokio::test]
    async fn test_pending_counts_outstanding_replies() {
        let repo = InMemoryConversationRepository::create();
        let conversation = repo
            .create_conversation(Conversation::new(Message::user("seed")))
            .await;

        repo.append_user_message(conversation.id, Message::user("one"))
            .await
            .unwrap();
        repo.append_user_message(conversation.id, Message::user("two"))
            .await
            .unwrap();
        assert_eq!(repo.get_conversation(conversation.id).await.unwrap().pending_replies, 2);

        repo.complete_reply(conversation.id, classify_and_respond("one"))
            .await
            .unwrap();
        let stored = repo.get_conversation(conversation.id).await.unwrap();
        assert!(stored.is_pending());
        assert_eq!(stored.messages.len(), 4);

        repo.complete_reply(conversation.id, classify_and_respond("two"))
            .await
            .unwrap();
        assert!(!repo.get_conversation(conversation.id).await.unwrap().is_pending());
    }

    #[tokio::test]
    async fn test_delete_discards_whole_conversation() {
        let repo = InMemoryConversationRepository::create();
        let conversation = repo
            .create_conversation(Conversation::new(Message::user("seed")))
            .await;

        repo.delete_conversation(conversation.id).await.unwrap();

        assert_eq!(
            repo.list_conversation_messages(conversation.id).await.unwrap_err(),
            AppError::ConversationNotFound(conversation.id)
        );
        assert!(
            repo.complete_reply(conversation.id, classify_and_respond("late"))
                .await
                .is_err()
        );
        assert!(repo.delete_conversation(conversation.id).await.is_err());
    }

    #[tokio::test]
    async fn test_conversations_listed_oldest_first() {
        let repo = InMemoryConversationRepository::create();
        let first = repo
            .create_conversation(Conversation::new(Message::user("a")))
            .await;
        let second = repo
            .create_conversation(Conversation::new(Message::user("b")))
            .await;

        let ids: Vec<_> = repo.list_conversations().await.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
