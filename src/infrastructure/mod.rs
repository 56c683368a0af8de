//! Conversation storage.

pub mod entities;
pub mod repositories;
pub mod traits;
