//! Cohere language models

use crate::{BaseModel, LMError, LanguageModel, Payload, Provider, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A Cohere language model
///
/// Has no configuration yet; prompting always fails with
/// [`LMError::Unimplemented`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohereLM;

impl CohereLM {
    /// Create a new Cohere model
    pub fn new() -> Self {
        Self
    }
}

impl BaseModel for CohereLM {
    fn provider(&self) -> Provider {
        Provider::Cohere
    }
}

#[async_trait]
impl<P: Payload> LanguageModel<P> for CohereLM {
    #[instrument(skip(self, _prompt))]
    async fn prompt(&self, _prompt: P) -> Result<P> {
        debug!("prompting is not implemented for cohere");
        Err(LMError::Unimplemented {
            provider: Provider::Cohere,
        })
    }
}
