//! Language model capability traits

use crate::{LMError, Provider, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Base trait for all models
///
/// Models are read-only once constructed, so a single instance can be shared
/// across tasks (e.g. behind an `Arc`) and prompted concurrently.
pub trait BaseModel: Send + Sync {
    /// The provider family this model belongs to
    fn provider(&self) -> Provider;
}

/// Trait for language models
///
/// The payload type `T` is shared by the prompt and its output. Text models
/// use `String`; richer payloads (structured messages) can implement the
/// trait for their own types.
///
/// # Cancellation
///
/// Dropping the future returned by [`LanguageModel::prompt`] cancels the
/// call. Implementations must not rely on the future being polled to
/// completion.
#[async_trait]
pub trait LanguageModel<T: Send + 'static>: BaseModel {
    /// Prompt the model and return its output
    ///
    /// Each call is independent of any other call on the same model; no
    /// ordering is guaranteed between concurrent calls.
    async fn prompt(&self, prompt: T) -> Result<T>;
}

/// A model whose sampling parameters form a single configuration value
pub trait Configurable {
    /// Configuration applied on every prompt
    type Config: Clone + Send + Sync + 'static;

    /// The configuration used by [`LanguageModel::prompt`]
    fn config(&self) -> &Self::Config;
}

/// A language model that can be prompted with a one-off configuration
///
/// [`LanguageModel::prompt`] behaves like
/// `prompt_with_config(prompt, self.config().clone())`.
#[async_trait]
pub trait ConfigurableModel<T: Send + 'static>: LanguageModel<T> + Configurable {
    /// Prompt the model using `config` instead of its own configuration
    async fn prompt_with_config(&self, prompt: T, config: Self::Config) -> Result<T>;

    /// Prompt the model with each input in turn, using `config` for all of
    /// them
    ///
    /// Stops at the first error.
    async fn prompt_many_with_config<I>(&self, prompts: I, config: Self::Config) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = T> + Send,
        I::IntoIter: Send,
    {
        let mut outputs = Vec::new();
        for prompt in prompts {
            outputs.push(self.prompt_with_config(prompt, config.clone()).await?);
        }
        Ok(outputs)
    }
}

/// Extension methods available on every [`LanguageModel`]
#[async_trait]
pub trait LanguageModelExt<T: Send + 'static>: LanguageModel<T> {
    /// Prompt the model with each input in turn
    ///
    /// Outputs are returned in input order. Stops at the first error; later
    /// inputs are not sent.
    async fn prompt_many<I>(&self, prompts: I) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = T> + Send,
        I::IntoIter: Send,
    {
        let mut outputs = Vec::new();
        for prompt in prompts {
            outputs.push(self.prompt(prompt).await?);
        }
        Ok(outputs)
    }

    /// Prompt the model, failing with [`LMError::Timeout`] if no output is
    /// produced within `timeout`
    ///
    /// The in-flight call is dropped when the deadline expires.
    async fn prompt_with_timeout(&self, prompt: T, timeout: Duration) -> Result<T> {
        match tokio::time::timeout(timeout, self.prompt(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(provider = %self.provider(), ?timeout, "prompt timed out");
                Err(LMError::Timeout(timeout))
            }
        }
    }
}

impl<T: Send + 'static, M: LanguageModel<T> + ?Sized> LanguageModelExt<T> for M {}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::{Sequence, mock};
    use std::sync::Arc;

    mock! {
        pub Model {}

        impl BaseModel for Model {
            fn provider(&self) -> Provider;
        }

        #[async_trait]
        impl LanguageModel<String> for Model {
            async fn prompt(&self, prompt: String) -> Result<String>;
        }
    }

    struct SlowModel {
        delay: Duration,
    }

    impl BaseModel for SlowModel {
        fn provider(&self) -> Provider {
            Provider::OpenAI
        }
    }

    #[async_trait]
    impl LanguageModel<String> for SlowModel {
        async fn prompt(&self, prompt: String) -> Result<String> {
            tokio::time::sleep(self.delay).await;
            Ok(prompt)
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let mut mock = MockModel::new();
        mock.expect_prompt()
            .withf(|prompt| prompt == "ping")
            .times(1)
            .returning(|_| Ok("pong".to_string()));
        mock.expect_provider().return_const(Provider::Anthropic);

        let model: Arc<dyn LanguageModel<String>> = Arc::new(mock);
        assert_eq!(model.provider(), Provider::Anthropic);
        assert_eq!(model.prompt("ping".to_string()).await.unwrap(), "pong");
    }

    #[tokio::test]
    async fn test_prompt_many_keeps_order() {
        let mut mock = MockModel::new();
        let mut seq = Sequence::new();
        for (input, output) in [("a", "1"), ("b", "2"), ("c", "3")] {
            mock.expect_prompt()
                .withf(move |prompt| prompt == input)
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| Ok(output.to_string()));
        }

        let outputs = mock
            .prompt_many(["a", "b", "c"].map(String::from))
            .await
            .unwrap();
        assert_eq!(outputs, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_prompt_many_stops_at_first_error() {
        let mut mock = MockModel::new();
        mock.expect_prompt()
            .withf(|prompt| prompt == "ok")
            .times(1)
            .returning(Ok);
        mock.expect_prompt()
            .withf(|prompt| prompt == "bad")
            .times(1)
            .returning(|_| Err(LMError::RequestFailed("boom".to_string())));
        // "after" must never be sent

        let result = mock
            .prompt_many(vec!["ok".to_string(), "bad".to_string(), "after".to_string()])
            .await;
        assert!(matches!(result, Err(LMError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_prompt_many_empty() {
        let mock = MockModel::new();
        let outputs = mock.prompt_many(Vec::<String>::new()).await.unwrap();
        assert!(outputs.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_with_timeout_passes_through_errors() {
        let mut mock = MockModel::new();
        mock.expect_prompt()
            .returning(|_| Err(LMError::RateLimitExceeded("slow down".to_string())));

        let result = mock
            .prompt_with_timeout("hi".to_string(), Duration::from_secs(1))
            .await;
        assert!(matches!(result, Err(LMError::RateLimitExceeded(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_prompt_with_timeout_completes_in_time() {
        let model = SlowModel {
            delay: Duration::from_millis(10),
        };
        let output = model
            .prompt_with_timeout("hello".to_string(), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(output, "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn test_prompt_with_timeout_expires() {
        let model = SlowModel {
            delay: Duration::from_secs(60),
        };
        let result = model
            .prompt_with_timeout("hello".to_string(), Duration::from_secs(5))
            .await;
        match result {
            Err(LMError::Timeout(timeout)) => assert_eq!(timeout, Duration::from_secs(5)),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
