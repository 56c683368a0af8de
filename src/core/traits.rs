//! DI "Interfaces"

use crate::core::assistant::Submission;
use crate::core::model::Message;
use crate::core::simulators::{JobGroup, JobKind, SimulationJob};
use crate::error::AppResult;
use crate::infrastructure::entities;
use async_trait::async_trait;
use uuid::Uuid;

/// Produces the assistant's answer to a query.
///
/// The scripted implementation answers from canned data after a fixed delay;
/// a real model backend can be swapped in behind the same interface.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, query: &str) -> Message;
}

#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Lists all conversations of this process, oldest first.
    async fn list_conversations(&self) -> Vec<entities::Conversation>;

    /// Creates a new conversation seeded with the assistant's welcome message.
    async fn create_conversation(&self) -> entities::Conversation;

    /// Discards a conversation and everything in it.
    ///
    /// Returns `Err` if the conversation did not exist.
    async fn delete_conversation(&self, conversation_id: Uuid) -> AppResult<()>;

    /// List all messages in a conversation.
    async fn list_messages(&self, conversation_id: Uuid) -> AppResult<Vec<Message>>;

    /// Whether any submitted query is still waiting for its reply.
    async fn is_pending(&self, conversation_id: Uuid) -> AppResult<bool>;

    /// Submits a user query.
    ///
    /// Blank queries are ignored and yield `Ok(None)`. Otherwise the user message is
    /// appended right away and the returned [`Submission`] resolves once the
    /// assistant's reply has been appended too.
    async fn submit(&self, conversation_id: Uuid, query: String) -> AppResult<Option<Submission>>;
}

#[async_trait]
pub trait SimulatorService: Send + Sync {
    /// Starts a simulated upload or generation job in the `processing` state.
    ///
    /// Returns `Err` for blank file names or prompts.
    async fn start(&self, kind: JobKind) -> AppResult<SimulationJob>;

    /// Looks up a job in one list. A job from the other list is reported as not found.
    async fn get(&self, group: JobGroup, job_id: Uuid) -> AppResult<SimulationJob>;

    /// Uploaded files, in upload order.
    async fn list_uploads(&self) -> Vec<SimulationJob>;

    /// Generated posters and videos, newest first.
    async fn list_generations(&self) -> Vec<SimulationJob>;

    async fn remove(&self, group: JobGroup, job_id: Uuid) -> AppResult<()>;
}
