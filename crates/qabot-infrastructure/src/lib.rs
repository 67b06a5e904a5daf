//! Infrastructure implementations for qabot.
//!
//! Provides the in-memory session store and the environment-backed
//! configuration loader.

pub mod env_config;
pub mod memory_session_store;

pub use crate::env_config::EnvConfigLoader;
pub use crate::memory_session_store::InMemorySessionStore;
