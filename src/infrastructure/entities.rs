//! Stored entities

use crate::core::model::Message;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Append-only log, oldest first.
    pub messages: Vec<Message>,
    /// Replies accepted but not yet appended.
    pub pending_replies: usize,
}

impl Conversation {
    pub fn new(seed: Message) -> Self {
        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            messages: vec![seed],
            pending_replies: 0,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_replies > 0
    }
}
