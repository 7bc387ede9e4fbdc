//! Provider configuration files
//!
//! A configuration file describes a single language model as JSON, tagged by
//! provider.
//!
//! # Example
//!
//! ```json
//! {
//!   "provider": "openai",
//!   "model": "gpt-3.5-turbo",
//!   "temperature": 0.2,
//!   "max_tokens": 64
//! }
//! ```
//!
//! OpenAI sampling parameters that are left out take their usual defaults.

use crate::providers::{AnthropicLM, CohereLM, OpenAILM};
use crate::{LM, LMError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Configuration for one language model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// OpenAI model and sampling parameters
    #[serde(rename = "openai")]
    OpenAI(OpenAILM),

    /// Anthropic sampling temperature
    Anthropic(AnthropicLM),

    /// Cohere (no configuration)
    Cohere,
}

impl ProviderConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a file
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use zero_models::ProviderConfig;
    /// let lm = ProviderConfig::from_file("model.json")?.build()?;
    /// # Ok::<(), zero_models::LMError>(())
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading provider configuration");

        let content = std::fs::read_to_string(path).map_err(|e| {
            LMError::Configuration(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        Self::from_json_str(&content)
    }

    /// Construct the language model
    ///
    /// Parsing already checks parameter ranges; values built in code are
    /// checked again here.
    pub fn build(self) -> Result<LM> {
        match self {
            ProviderConfig::OpenAI(lm) => {
                lm.validate()?;
                Ok(LM::OpenAI(lm))
            }
            ProviderConfig::Anthropic(lm) => {
                lm.validate()?;
                Ok(LM::Anthropic(lm))
            }
            ProviderConfig::Cohere => Ok(LM::Cohere(CohereLM::new())),
        }
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)
            .map_err(|e| LMError::Configuration(format!("Failed to write config file: {e}")))
    }
}

impl From<LM> for ProviderConfig {
    fn from(lm: LM) -> Self {
        match lm {
            LM::OpenAI(lm) => ProviderConfig::OpenAI(lm),
            LM::Anthropic(lm) => ProviderConfig::Anthropic(lm),
            LM::Cohere(_) => ProviderConfig::Cohere,
        }
    }
}

impl From<AnthropicLM> for ProviderConfig {
    fn from(lm: AnthropicLM) -> Self {
        ProviderConfig::Anthropic(lm)
    }
}

impl From<OpenAILM> for ProviderConfig {
    fn from(lm: OpenAILM) -> Self {
        ProviderConfig::OpenAI(lm)
    }
}
