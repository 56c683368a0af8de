//! Conversation data model.
//!
//! Messages are built once and never mutated afterwards; the only way to get a
//! different message is to build a new one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One point of a forecast chart. `actual` is absent for weeks that have not happened yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub predicted: f64,
    pub actual: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub name: String,
    pub units: u32,
    pub revenue: f64,
}

/// Structured data attached to a reply. A reply carries a chart or a table, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attachment {
    Series(Vec<SeriesPoint>),
    Table(Vec<ProductRow>),
}

/// The content of an assistant turn, without identity or timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub text: String,
    #[serde(flatten)]
    pub attachment: Option<Attachment>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(text: impl Into<String>, attachment: Attachment) -> Self {
        Self {
            text: text.into(),
            attachment: Some(attachment),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    id: Uuid,
    role: Role,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    content: Reply,
}

impl Message {
    fn new(role: Role, content: Reply) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            created_at: Utc::now(),
            content,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, Reply::text(text))
    }

    pub fn assistant(reply: Reply) -> Self {
        Self::new(Role::Assistant, reply)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn text(&self) -> &str {
        &self.content.text
    }

    pub fn content(&self) -> &Reply {
        &self.content
    }

    pub fn series(&self) -> Option<&[SeriesPoint]> {
        match &self.content.attachment {
            Some(Attachment::Series(series)) => Some(series),
            _ => None,
        }
    }

    pub fn table(&self) -> Option<&[ProductRow]> {
        match &self.content.attachment {
            Some(Attachment::Table(table)) => Some(table),
            _ => None,
        }
    }
}
