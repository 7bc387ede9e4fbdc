//! OpenAI language models
//!
//! [`OpenAILM`] holds the model identifier and sampling parameters for an
//! OpenAI model. Prompting does not reach the OpenAI API yet: the output is
//! the input, unchanged.
//!
//! # Examples
//!
//! ```
//! use zero_models::LanguageModel;
//! use zero_models::providers::{OpenAILM, OpenAIModel};
//!
//! # tokio_test::block_on(async {
//! let lm = OpenAILM::builder(OpenAIModel::Gpt35Turbo)
//!     .temperature(0.2)
//!     .max_tokens(64)
//!     .build()?;
//!
//! assert_eq!(lm.prompt("hello".to_string()).await?, "hello");
//! # Ok::<(), zero_models::LMError>(())
//! # })?;
//! # Ok::<(), zero_models::LMError>(())
//! ```

use crate::{
    BaseModel, Configurable, ConfigurableModel, LMError, LanguageModel, Payload, Provider, Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

const DEFAULT_TEMPERATURE: f32 = 1.0;
const DEFAULT_MAX_TOKENS: u32 = 16;
const DEFAULT_STOP: &str = "\n";

const TEMPERATURE_RANGE: (f32, f32) = (0.0, 2.0);
const TOP_P_RANGE: (f32, f32) = (0.0, 1.0);

/// Known OpenAI models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpenAIModel {
    /// ada
    #[serde(rename = "ada")]
    Ada,
    /// babbage
    #[serde(rename = "babbage")]
    Babbage,
    /// curie
    #[serde(rename = "curie")]
    Curie,
    /// davinci
    #[serde(rename = "davinci")]
    Davinci,
    /// gpt-3.5-turbo
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
}

impl OpenAIModel {
    /// Get the model identifier as used by the OpenAI API
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenAIModel::Ada => "ada",
            OpenAIModel::Babbage => "babbage",
            OpenAIModel::Curie => "curie",
            OpenAIModel::Davinci => "davinci",
            OpenAIModel::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }

    /// Get all known models
    pub fn all() -> &'static [OpenAIModel] {
        &[
            OpenAIModel::Ada,
            OpenAIModel::Babbage,
            OpenAIModel::Curie,
            OpenAIModel::Davinci,
            OpenAIModel::Gpt35Turbo,
        ]
    }
}

impl fmt::Display for OpenAIModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenAIModel {
    type Err = LMError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| LMError::UnknownModel(s.to_string()))
    }
}

/// Sampling parameters for an OpenAI model
///
/// Every parameter is optional; `None` leaves it to the backend default.
/// Deserializing checks the ranges, so a parsed value is always valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSamplingParams")]
pub struct SamplingParams {
    /// Sampling temperature, within `[0, 2]`
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate, at least 1
    pub max_tokens: Option<u32>,
    /// Nucleus sampling threshold, within `[0, 1]`
    pub top_p: Option<f32>,
    /// Stop sequence
    pub stop: Option<String>,
}

impl Default for SamplingParams {
    /// Temperature `1.0`, max_tokens `16`, no top_p, stop `"\n"`
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: None,
            stop: default_stop(),
        }
    }
}

impl SamplingParams {
    /// Check every parameter against its accepted range
    pub fn validate(&self) -> Result<()> {
        if let Some(temperature) = self.temperature {
            check_range("temperature", temperature, TEMPERATURE_RANGE)?;
        }
        if let Some(top_p) = self.top_p {
            check_range("top_p", top_p, TOP_P_RANGE)?;
        }
        if self.max_tokens == Some(0) {
            return Err(LMError::invalid_parameter(
                "max_tokens",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawSamplingParams {
    #[serde(default = "default_temperature")]
    temperature: Option<f32>,

    #[serde(default = "default_max_tokens")]
    max_tokens: Option<u32>,

    #[serde(default)]
    top_p: Option<f32>,

    #[serde(default = "default_stop")]
    stop: Option<String>,
}

impl TryFrom<RawSamplingParams> for SamplingParams {
    type Error = LMError;

    fn try_from(raw: RawSamplingParams) -> Result<Self> {
        let params = Self {
            temperature: raw.temperature,
            max_tokens: raw.max_tokens,
            top_p: raw.top_p,
            stop: raw.stop,
        };
        params.validate()?;
        Ok(params)
    }
}

// Default functions for serde
#[allow(clippy::unnecessary_wraps)]
fn default_temperature() -> Option<f32> {
    Some(DEFAULT_TEMPERATURE)
}

#[allow(clippy::unnecessary_wraps)]
fn default_max_tokens() -> Option<u32> {
    Some(DEFAULT_MAX_TOKENS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_stop() -> Option<String> {
    Some(DEFAULT_STOP.to_string())
}

/// An OpenAI language model
///
/// Construct with [`OpenAILM::new`] for the default sampling parameters, or
/// with [`OpenAILM::builder`] to override them. The configuration cannot be
/// changed afterwards, but a single call can use different parameters
/// through [`ConfigurableModel::prompt_with_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAILM {
    model: OpenAIModel,

    #[serde(flatten)]
    params: SamplingParams,
}

impl OpenAILM {
    /// Create a model with the default sampling parameters
    ///
    /// Defaults: temperature `1.0`, max_tokens `16`, no top_p, stop `"\n"`.
    pub fn new(model: OpenAIModel) -> Self {
        Self {
            model,
            params: SamplingParams::default(),
        }
    }

    /// Create a builder for an OpenAI model
    pub fn builder(model: OpenAIModel) -> OpenAILMBuilder {
        OpenAILMBuilder::new(model)
    }

    /// The model identifier
    pub fn model(&self) -> OpenAIModel {
        self.model
    }

    /// Sampling temperature
    pub fn temperature(&self) -> Option<f32> {
        self.params.temperature
    }

    /// Maximum number of tokens to generate
    pub fn max_tokens(&self) -> Option<u32> {
        self.params.max_tokens
    }

    /// Nucleus sampling threshold
    pub fn top_p(&self) -> Option<f32> {
        self.params.top_p
    }

    /// Stop sequence
    pub fn stop(&self) -> Option<&str> {
        self.params.stop.as_deref()
    }

    /// Check every sampling parameter against its accepted range
    pub fn validate(&self) -> Result<()> {
        self.params.validate()
    }
}

pub(crate) fn check_range(name: &'static str, value: f32, (min, max): (f32, f32)) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(LMError::invalid_parameter(
            name,
            format!("must be within [{min}, {max}], got {value}"),
        ));
    }
    Ok(())
}

impl BaseModel for OpenAILM {
    fn provider(&self) -> Provider {
        Provider::OpenAI
    }
}

impl Configurable for OpenAILM {
    type Config = SamplingParams;

    fn config(&self) -> &SamplingParams {
        &self.params
    }
}

#[async_trait]
impl<P: Payload> LanguageModel<P> for OpenAILM {
    async fn prompt(&self, prompt: P) -> Result<P> {
        self.prompt_with_config(prompt, self.params.clone()).await
    }
}

#[async_trait]
impl<P: Payload> ConfigurableModel<P> for OpenAILM {
    #[instrument(skip(self, prompt, config), fields(model = %self.model))]
    async fn prompt_with_config(&self, prompt: P, config: SamplingParams) -> Result<P> {
        config.validate()?;
        prompt.ensure_resolved()?;

        // No request is sent to the OpenAI API; the prompt is echoed back.
        debug!(
            temperature = ?config.temperature,
            max_tokens = ?config.max_tokens,
            "prompting model"
        );
        Ok(prompt)
    }
}

/// Builder for [`OpenAILM`]
#[derive(Debug, Clone)]
pub struct OpenAILMBuilder {
    inner: OpenAILM,
}

impl OpenAILMBuilder {
    /// Create a new builder with the default sampling parameters
    pub fn new(model: OpenAIModel) -> Self {
        Self {
            inner: OpenAILM::new(model),
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.inner.params.temperature = Some(temperature);
        self
    }

    /// Leave the temperature to the backend default
    pub fn without_temperature(mut self) -> Self {
        self.inner.params.temperature = None;
        self
    }

    /// Set the maximum tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.inner.params.max_tokens = Some(max_tokens);
        self
    }

    /// Leave the maximum tokens to the backend default
    pub fn without_max_tokens(mut self) -> Self {
        self.inner.params.max_tokens = None;
        self
    }

    /// Set the nucleus sampling threshold
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.inner.params.top_p = Some(top_p);
        self
    }

    /// Set the stop sequence
    pub fn stop(mut self, stop: impl Into<String>) -> Self {
        self.inner.params.stop = Some(stop.into());
        self
    }

    /// Generate without a stop sequence
    pub fn without_stop(mut self) -> Self {
        self.inner.params.stop = None;
        self
    }

    /// Validate the parameters and build the model
    pub fn build(self) -> Result<OpenAILM> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
