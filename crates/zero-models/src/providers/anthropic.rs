//! Anthropic language models

use super::openai::check_range;
use crate::{BaseModel, LMError, LanguageModel, Payload, Provider, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// An Anthropic language model
///
/// Only the sampling temperature is configurable. Prompting is not
/// implemented yet and always fails with [`LMError::Unimplemented`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAnthropicLM")]
pub struct AnthropicLM {
    temperature: f32,
}

#[derive(Deserialize)]
struct RawAnthropicLM {
    temperature: f32,
}

impl TryFrom<RawAnthropicLM> for AnthropicLM {
    type Error = LMError;

    fn try_from(raw: RawAnthropicLM) -> Result<Self> {
        Self::new(raw.temperature)
    }
}

impl AnthropicLM {
    /// Create a new Anthropic model
    ///
    /// The temperature must be within `[0, 1]`.
    pub fn new(temperature: f32) -> Result<Self> {
        let lm = Self { temperature };
        lm.validate()?;
        Ok(lm)
    }

    /// Sampling temperature
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Check the temperature against its accepted range
    pub fn validate(&self) -> Result<()> {
        check_range("temperature", self.temperature, (0.0, 1.0))
    }
}

impl BaseModel for AnthropicLM {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }
}

#[async_trait]
impl<P: Payload> LanguageModel<P> for AnthropicLM {
    #[instrument(skip(self, _prompt), fields(temperature = self.temperature))]
    async fn prompt(&self, _prompt: P) -> Result<P> {
        debug!("prompting is not implemented for anthropic");
        Err(LMError::Unimplemented {
            provider: Provider::Anthropic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let lm = AnthropicLM::new(0.5).unwrap();
        assert_eq!(lm.temperature(), 0.5);
        assert_eq!(lm.provider(), Provider::Anthropic);
    }

    #[test]
    fn test_temperature_out_of_range() {
        assert!(AnthropicLM::new(0.0).is_ok());
        assert!(AnthropicLM::new(1.0).is_ok());

        let err = AnthropicLM::new(1.5).unwrap_err();
        assert!(matches!(
            err,
            LMError::InvalidParameter {
                name: "temperature",
                ..
            }
        ));
        assert!(AnthropicLM::new(f32::INFINITY).is_err());
    }

    #[test]
    fn test_deserialize_checks_temperature() {
        let lm: AnthropicLM = serde_json::from_str(r#"{"temperature": 0.25}"#).unwrap();
        assert_eq!(lm.temperature(), 0.25);

        let err = serde_json::from_str::<AnthropicLM>(r#"{"temperature": 7.0}"#).unwrap_err();
        assert!(err.to_string().contains("temperature"), "{err}");
        assert!(serde_json::from_str::<AnthropicLM>(r#"{"temperature": -0.1}"#).is_err());
        assert!(serde_json::from_str::<AnthropicLM>("{}").is_err());
    }

    #[tokio::test]
    async fn test_prompt_unimplemented() {
        let lm = AnthropicLM::new(0.7).unwrap();
        let err = lm.prompt("hello".to_string()).await.unwrap_err();
        assert!(matches!(
            err,
            LMError::Unimplemented {
                provider: Provider::Anthropic
            }
        ));
    }
}
