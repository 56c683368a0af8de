//! Scripted small-business assistant server - Library exports for testing
//!
//! (c) Softlandia 2025

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod infrastructure;

use crate::config::AppConfig;
use crate::core::assistant::{ReplyDispatcher, ScriptedResponder};
use crate::core::services::AssistantConversationService;
use crate::core::simulators::MockSimulator;
use crate::infrastructure::repositories::InMemoryConversationRepository;
use di::{Injectable, ServiceCollection};

/// All services of the app. Stores are singletons so state survives across requests.
pub fn services() -> ServiceCollection {
    let mut services = ServiceCollection::new();
    services
        .add(AppConfig::singleton())
        .add(InMemoryConversationRepository::singleton())
        .add(ScriptedResponder::singleton())
        .add(ReplyDispatcher::singleton())
        .add(AssistantConversationService::scoped())
        .add(MockSimulator::singleton());
    services
}
