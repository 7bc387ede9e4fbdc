//! Concrete language model providers
//!
//! This module contains implementations of the [`LanguageModel`](crate::LanguageModel)
//! trait for each supported provider.

pub mod anthropic;
pub mod cohere;
pub mod openai;

pub use anthropic::AnthropicLM;
pub use cohere::CohereLM;
pub use openai::{OpenAILM, OpenAILMBuilder, OpenAIModel, SamplingParams};
