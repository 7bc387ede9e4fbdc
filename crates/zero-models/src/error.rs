//! Error types for language model operations

use crate::Provider;
use std::time::Duration;
use thiserror::Error;

/// Result type for language model operations
pub type Result<T> = std::result::Result<T, LMError>;

/// Errors that can occur while configuring or prompting a language model
#[derive(Error, Debug)]
pub enum LMError {
    /// Model identifier is not one of the known models
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Provider name is not one of the supported providers
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// A sampling parameter is outside its accepted range
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name (e.g. "temperature")
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The provider has no prompting implementation yet
    #[error("Prompting is not implemented for provider `{provider}`")]
    Unimplemented {
        /// Provider that was prompted
        provider: Provider,
    },

    /// The prompt did not complete within the allotted time
    #[error("Prompt timed out after {0:?}")]
    Timeout(Duration),

    /// A prompt template still has placeholders without a value
    #[error("Unresolved prompt variables: {}", .0.join(", "))]
    UnresolvedVars(Vec<String>),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request to the provider failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
}

impl LMError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LMError::invalid_parameter("top_p", "must be within [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `top_p`: must be within [0, 1], got 1.5"
        );

        let err = LMError::Unimplemented {
            provider: Provider::Cohere,
        };
        assert_eq!(
            err.to_string(),
            "Prompting is not implemented for provider `cohere`"
        );

        let err = LMError::UnresolvedVars(vec!["name".to_string(), "topic".to_string()]);
        assert_eq!(err.to_string(), "Unresolved prompt variables: name, topic");
    }
}
