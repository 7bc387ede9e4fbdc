//! Language model abstraction layer for zero
//!
//! This crate provides a provider-agnostic interface for prompting large
//! language models. It includes:
//!
//! - The [`LanguageModel`] capability trait and its timeout and batch
//!   extensions
//! - [`ConfigurableModel`] for one-off sampling parameters
//! - Provider implementations for OpenAI, Anthropic, and Cohere
//! - [`LM`], a closed set of providers selected at construction time
//! - Prompt templates ([`Prompt`], [`PromptList`]) and the [`prompt!`] macro
//! - JSON provider configuration files
//!
//! Prompting does not reach any external service yet: the OpenAI model
//! returns its input unchanged and the other providers report
//! [`LMError::Unimplemented`].

mod macros;

pub mod config;
pub mod error;
pub mod lm;
pub mod model;
pub mod prompt;
pub mod provider;
pub mod providers;

// Re-export main types
pub use config::ProviderConfig;
pub use error::{LMError, Result};
pub use lm::LM;
pub use model::{BaseModel, Configurable, ConfigurableModel, LanguageModel, LanguageModelExt};
pub use prompt::{Payload, Prompt, PromptList, PromptMessage, Role, Template};
pub use provider::Provider;
