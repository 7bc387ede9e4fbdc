//! Provider identifiers

use crate::LMError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The backend family a model belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI models
    #[serde(rename = "openai")]
    OpenAI,
    /// Anthropic models
    Anthropic,
    /// Cohere models
    Cohere,
}

impl Provider {
    /// Get the provider name (e.g., "openai", "anthropic")
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Cohere => "cohere",
        }
    }

    /// Get all supported providers
    pub fn all() -> &'static [Provider] {
        &[Provider::OpenAI, Provider::Anthropic, Provider::Cohere]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = LMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "anthropic" => Ok(Provider::Anthropic),
            "cohere" => Ok(Provider::Cohere),
            _ => Err(LMError::UnknownProvider(s.to_string())),
        }
    }
}
