//! Scripted assistant and the background reply workers.
//!
//! Every conversation gets its own reply lane: a channel drained by a single
//! worker task, so replies are appended in the order their queries arrived.

use crate::config::AppConfig;
use crate::core::engine;
use crate::core::model::Message;
use crate::core::traits::Responder;
use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::ConversationRepository;
use async_trait::async_trait;
use di::{Ref, inject, injectable};
use log::{debug, error, info};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::time::Instant;
use uuid::Uuid;

/// Answers from the scripted response engine after a fixed "thinking" delay.
pub struct ScriptedResponder {
    delay: Duration,
}

impl ScriptedResponder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[injectable(Responder)]
impl ScriptedResponder {
    #[inject]
    pub fn create(config: Ref<AppConfig>) -> ScriptedResponder {
        ScriptedResponder::new(config.reply_delay)
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn respond(&self, query: &str) -> Message {
        tokio::time::sleep(self.delay).await;
        engine::classify_and_respond(query)
    }
}

pub struct ReplyTask {
    query: String,
    return_channel: oneshot::Sender<Message>,
}

impl ReplyTask {
    pub fn new(query: String) -> (ReplyTask, oneshot::Receiver<Message>) {
        let (sender, receiver) = oneshot::channel();

        (
            ReplyTask {
                query,
                return_channel: sender,
            },
            receiver,
        )
    }
}

/// A query that has been accepted into a conversation.
#[derive(Debug)]
pub struct Submission {
    pub conversation_id: Uuid,
    pub user_message: Message,
    reply: oneshot::Receiver<Message>,
}

impl Submission {
    /// Waits until the assistant's reply has been appended to the conversation.
    pub async fn reply(self) -> AppResult<Message> {
        self.reply
            .await
            .map_err(|_| AppError::ReplyDropped(self.conversation_id))
    }
}

/// Drains one conversation's reply lane until the lane is closed or the conversation is gone.
pub async fn reply_worker(
    conversation_id: Uuid,
    mut task_queue: mpsc::UnboundedReceiver<ReplyTask>,
    repo: Ref<dyn ConversationRepository>,
    responder: Ref<dyn Responder>,
) {
    debug!("reply worker started for conversation {conversation_id}");

    while let Some(task) = task_queue.recv().await {
        let started = Instant::now();
        let reply = responder.respond(&task.query).await;

        if let Err(e) = repo.complete_reply(conversation_id, reply.clone()).await {
            debug!("reply worker for {conversation_id} stopping: {e}");
            return;
        }

        debug!(
            "replied in conversation {conversation_id} after {:?}",
            started.elapsed()
        );

        // The submitter may have stopped listening; the reply is stored either way.
        let _ = task.return_channel.send(reply);
    }

    debug!("reply lane closed for conversation {conversation_id}");
}

/// Owns the reply lanes of all conversations.
pub struct ReplyDispatcher {
    repo: Ref<dyn ConversationRepository>,
    responder: Ref<dyn Responder>,
    lanes: Mutex<HashMap<Uuid, mpsc::UnboundedSender<ReplyTask>>>,
}

#[injectable]
impl ReplyDispatcher {
    #[inject]
    pub fn create(
        repo: Ref<dyn ConversationRepository>,
        responder: Ref<dyn Responder>,
    ) -> ReplyDispatcher {
        ReplyDispatcher {
            repo,
            responder,
            lanes: Mutex::new(HashMap::new()),
        }
    }
}

impl ReplyDispatcher {
    /// Appends the user message and queues its reply behind any earlier ones.
    ///
    /// Both happen under the lanes lock, so the order of user messages in the log
    /// is also the order in which their replies get appended.
    pub async fn submit(&self, conversation_id: Uuid, query: String) -> AppResult<Submission> {
        let mut lanes = self.lanes.lock().await;

        let user_message = Message::user(query.clone());
        self.repo
            .append_user_message(conversation_id, user_message.clone())
            .await?;

        if lanes.get(&conversation_id).is_none_or(|lane| lane.is_closed()) {
            lanes.insert(conversation_id, self.spawn_lane(conversation_id));
        }

        let (task, receiver) = ReplyTask::new(query);
        if let Some(lane) = lanes.get(&conversation_id) {
            if lane.send(task).is_err() {
                error!("reply lane for conversation {conversation_id} closed unexpectedly");
            }
        }

        Ok(Submission {
            conversation_id,
            user_message,
            reply: receiver,
        })
    }

    /// Closes a conversation's lane. Queued replies are dropped once the worker notices
    /// the conversation is gone.
    pub async fn close(&self, conversation_id: Uuid) {
        if self.lanes.lock().await.remove(&conversation_id).is_some() {
            info!("closed reply lane for conversation {conversation_id}");
        }
    }

    fn spawn_lane(&self, conversation_id: Uuid) -> mpsc::UnboundedSender<ReplyTask> {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(reply_worker(
            conversation_id,
            receiver,
            self.repo.clone(),
            self.responder.clone(),
        ));
        sender
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Role;
    use crate::infrastructure::entities::Conversation;
    use crate::infrastructure::repositories::InMemoryConversationRepository;

    async fn setup(delay: Duration) -> (ReplyDispatcher, Ref<dyn ConversationRepository>, Uuid) {
        let repo: Ref<dyn ConversationRepository> =
            Ref::new(InMemoryConversationRepository::create());
        let responder: Ref<dyn Responder> = Ref::new(ScriptedResponder::new(delay));
        let conversation = repo
            .create_conversation(Conversation::new(Message::user("seed")))
            .await;

        (
            ReplyDispatcher::create(repo.clone(), responder),
            repo,
            conversation.id,
        )
    }

    #[tokio::test]
    async fn test_reply_task_new_creates_channel() {
        let (task, receiver) = ReplyTask::new("hello".to_string());
        assert_eq!(task.query, "hello");

        let message = engine::classify_and_respond(&task.query);
        task.return_channel.send(message.clone()).unwrap();

        assert_eq!(receiver.await.unwrap().id(), message.id());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_responder_waits_for_delay() {
        let responder = ScriptedResponder::new(Duration::from_millis(1500));
        let started = Instant::now();

        let reply = responder.respond("best").await;

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(reply.role(), Role::Assistant);
        assert!(reply.table().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replies_follow_submission_order() {
        let (dispatcher, repo, id) = setup(Duration::from_millis(1500)).await;

        let first = dispatcher.submit(id, "best".into()).await.unwrap();
        let second = dispatcher.submit(id, "forecast".into()).await.unwrap();
        let third = dispatcher.submit(id, "hello".into()).await.unwrap();

        let third_reply = third.reply().await.unwrap();
        let first_reply = first.reply().await.unwrap();
        let second_reply = second.reply().await.unwrap();
        assert!(first_reply.table().is_some());
        assert!(second_reply.series().is_some());

        let messages = repo.list_conversation_messages(id).await.unwrap();
        let ids: Vec<_> = messages.iter().skip(4).map(|m| m.id()).collect();
        assert_eq!(ids, vec![first_reply.id(), second_reply.id(), third_reply.id()]);
        assert!(!repo.get_conversation(id).await.unwrap().is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_conversation_drops_reply() {
        let (dispatcher, repo, id) = setup(Duration::from_millis(1500)).await;

        let submission = dispatcher.submit(id, "hello".into()).await.unwrap();
        repo.delete_conversation(id).await.unwrap();
        dispatcher.close(id).await;

        assert_eq!(submission.reply().await.unwrap_err(), AppError::ReplyDropped(id));
    }

    #[tokio::test]
    async fn test_submit_to_unknown_conversation_fails() {
        let (dispatcher, _, _) = setup(Duration::ZERO).await;
        let unknown = Uuid::new_v4();

        let result = dispatcher.submit(unknown, "hello".into()).await;

        assert_eq!(result.unwrap_err(), AppError::ConversationNotFound(unknown));
    }
}
