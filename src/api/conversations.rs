//! Conversations endpoints

use crate::api::conversations::schemas::{ConversationDetail, ConversationList, CreateMessage};
use crate::core::traits::ConversationService;
use crate::error::AppError;
use async_stream::stream;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Sse;
use axum::response::sse::{Event, KeepAlive};
use axum::routing::{delete, get};
use axum::{Json, Router};
use di_axum::Inject;
use futures_util::Stream;
use uuid::Uuid;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_conversations).post(new_conversation))
        .route("/:id", delete(delete_conversation))
        .route(
            "/:id/messages",
            get(conversation_messages).post(post_message),
        )
}

async fn list_conversations(
    Inject(conversation_service): Inject<dyn ConversationService>,
) -> Json<ConversationList> {
    let conversations = conversation_service.list_conversations().await;

    ConversationList {
        conversations: conversations
            .into_iter()
            .map(schemas::Conversation::from)
            .collect(),
    }
    .into()
}

async fn new_conversation(
    Inject(conversation_service): Inject<dyn ConversationService>,
) -> (StatusCode, Json<ConversationDetail>) {
    let conversation = conversation_service.create_conversation().await;

    (StatusCode::CREATED, Json(conversation.into()))
}

async fn delete_conversation(
    Inject(conversation_service): Inject<dyn ConversationService>,
    Path(conversation_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    conversation_service
        .delete_conversation(conversation_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn conversation_messages(
    Inject(conversation_service): Inject<dyn ConversationService>,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<schemas::MessagesList>, AppError> {
    let messages = conversation_service.list_messages(conversation_id).await?;
    let pending = conversation_service.is_pending(conversation_id).await?;

    Ok(Json(schemas::MessagesList { messages, pending }))
}

/// Streams the stored user message right away and the assistant's reply once it lands.
async fn post_message(
    Inject(conversation_service): Inject<dyn ConversationService>,
    Path(conversation_id): Path<Uuid>,
    Json(message): Json<CreateMessage>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let submission = conversation_service
        .submit(conversation_id, message.text)
        .await?
        .ok_or(AppError::Rejected("message must not be blank"))?;

    let user_message = submission.user_message.clone();

    let stream = stream! {
        yield Event::default().event("new_message").json_data(&user_message);

        match submission.reply().await {
            Ok(reply) => {
                yield Event::default().event("assistant_message").json_data(&reply);
            }
            Err(e) => {
                yield Ok(Event::default().event("error").data(e.to_string()));
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

pub mod schemas {
    use crate::core::model::Message;
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Serialize, Debug)]
    pub struct Conversation {
        pub id: Uuid,
        pub created_at: DateTime<Utc>,
        pub message_count: usize,
        pub pending: bool,
    }

    impl From<entities::Conversation> for Conversation {
        fn from(conversation: entities::Conversation) -> Self {
            Conversation {
                id: conversation.id,
                created_at: conversation.created_at,
                message_count: conversation.messages.len(),
                pending: conversation.is_pending(),
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct ConversationList {
        pub conversations: Vec<Conversation>,
    }

    #[derive(Serialize, Debug)]
    pub struct ConversationDetail {
        pub id: Uuid,
        pub created_at: DateTime<Utc>,
        pub messages: Vec<Message>,
    }

    impl From<entities::Conversation> for ConversationDetail {
        fn from(conversation: entities::Conversation) -> Self {
            ConversationDetail {
                id: conversation.id,
                created_at: conversation.created_at,
                messages: conversation.messages,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct MessagesList {
        pub messages: Vec<Message>,
        pub pending: bool,
    }

    #[derive(Deserialize, Debug)]
    pub struct CreateMessage {
        pub text: String,
    }
}
