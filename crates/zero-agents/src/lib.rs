//! Agents for zero
//!
//! Agents are an abstraction over language models: they are meant to compose
//! one or more models into higher-level behavior. This crate only defines
//! the extension point; no orchestration is provided.

pub mod agent;

pub use agent::Agent;
