//! Provider selection
//!
//! [`LM`] is a closed set of every supported language model, chosen when it
//! is constructed. It lets callers hold "some language model" by value
//! without boxing a trait object.

use crate::providers::{AnthropicLM, CohereLM, OpenAILM};
use crate::{BaseModel, LanguageModel, Payload, Provider, Result};
use async_trait::async_trait;

/// A language model from any supported provider
#[derive(Debug, Clone, PartialEq)]
pub enum LM {
    /// An OpenAI model
    OpenAI(OpenAILM),
    /// An Anthropic model
    Anthropic(AnthropicLM),
    /// A Cohere model
    Cohere(CohereLM),
}

impl From<OpenAILM> for LM {
    fn from(lm: OpenAILM) -> Self {
        LM::OpenAI(lm)
    }
}

impl From<AnthropicLM> for LM {
    fn from(lm: AnthropicLM) -> Self {
        LM::Anthropic(lm)
    }
}

impl From<CohereLM> for LM {
    fn from(lm: CohereLM) -> Self {
        LM::Cohere(lm)
    }
}

impl BaseModel for LM {
    fn provider(&self) -> Provider {
        match self {
            LM::OpenAI(lm) => lm.provider(),
            LM::Anthropic(lm) => lm.provider(),
            LM::Cohere(lm) => lm.provider(),
        }
    }
}

#[async_trait]
impl<P: Payload> LanguageModel<P> for LM {
    async fn prompt(&self, prompt: P) -> Result<P> {
        match self {
            LM::OpenAI(lm) => lm.prompt(prompt).await,
            LM::Anthropic(lm) => lm.prompt(prompt).await,
            LM::Cohere(lm) => lm.prompt(prompt).await,
        }
    }
}
