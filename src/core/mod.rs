//! Assistant domain: the scripted response engine, conversations and simulators.

pub mod assistant;
pub mod engine;
pub mod mock;
pub mod model;
pub mod services;
pub mod simulators;
pub mod templates;
pub mod traits;
