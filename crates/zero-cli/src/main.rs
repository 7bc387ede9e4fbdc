//! Command-line interface for zero

use anyhow::{Context as _, bail};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};
use zero_models::providers::{AnthropicLM, CohereLM, OpenAILM, OpenAIModel};
use zero_models::{BaseModel, LM, LanguageModelExt, Provider, ProviderConfig};
use zero_utils::{LogFormat, LoggingConfig};

#[derive(Parser, Debug)]
#[command(name = "zero")]
#[command(about = "Prompt a language model from the command line", long_about = None)]
struct Args {
    /// Prompt text (read from stdin when omitted)
    input: Option<String>,

    /// Provider to prompt
    #[arg(short, long, default_value = "openai")]
    provider: Provider,

    /// OpenAI model identifier [default: gpt-3.5-turbo]
    #[arg(short, long)]
    model: Option<OpenAIModel>,

    /// Sampling temperature (required for anthropic, not accepted by cohere)
    #[arg(short, long)]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate (openai only)
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Nucleus sampling threshold (openai only)
    #[arg(long)]
    top_p: Option<f32>,

    /// Stop sequence (openai only)
    #[arg(long)]
    stop: Option<String>,

    /// Load the model from a provider configuration file instead of flags
    #[arg(short, long, conflicts_with_all = ["provider", "model", "temperature", "max_tokens", "top_p", "stop"])]
    config: Option<PathBuf>,

    /// Give up on the prompt after this many seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Log output format (pretty or json)
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,
}

impl Args {
    fn build_model(&self) -> anyhow::Result<LM> {
        if let Some(path) = &self.config {
            let lm = ProviderConfig::from_file(path)?.build()?;
            return Ok(lm);
        }

        let lm = match self.provider {
            Provider::OpenAI => {
                let model = self.model.unwrap_or(OpenAIModel::Gpt35Turbo);
                let mut builder = OpenAILM::builder(model);
                if let Some(temperature) = self.temperature {
                    builder = builder.temperature(temperature);
                }
                if let Some(max_tokens) = self.max_tokens {
                    builder = builder.max_tokens(max_tokens);
                }
                if let Some(top_p) = self.top_p {
                    builder = builder.top_p(top_p);
                }
                if let Some(stop) = &self.stop {
                    builder = builder.stop(stop.clone());
                }
                LM::from(builder.build()?)
            }
            Provider::Anthropic => {
                self.reject_openai_flags()?;
                let temperature = self
                    .temperature
                    .context("--temperature is required for the anthropic provider")?;
                LM::from(AnthropicLM::new(temperature)?)
            }
            Provider::Cohere => {
                self.reject_openai_flags()?;
                if self.temperature.is_some() {
                    bail!("--temperature is not supported by the cohere provider");
                }
                LM::from(CohereLM::new())
            }
        };

        Ok(lm)
    }

    fn reject_openai_flags(&self) -> anyhow::Result<()> {
        let given: Vec<&str> = [
            ("--model", self.model.is_some()),
            ("--max-tokens", self.max_tokens.is_some()),
            ("--top-p", self.top_p.is_some()),
            ("--stop", self.stop.is_some()),
        ]
        .into_iter()
        .filter_map(|(flag, set)| set.then_some(flag))
        .collect();

        if !given.is_empty() {
            bail!(
                "{} only apply to the openai provider, not {}",
                given.join(", "),
                self.provider
            );
        }
        Ok(())
    }
}

/// Use `input` if given, otherwise read the whole of `reader`
async fn read_input<R>(input: Option<String>, mut reader: R) -> anyhow::Result<String>
where
    R: AsyncRead + Unpin,
{
    if let Some(input) = input {
        return Ok(input);
    }

    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .await
        .context("failed to read prompt from stdin")?;
    Ok(buf)
}

/// Write the model output exactly as produced
fn write_output(out: &mut impl Write, output: &str) -> std::io::Result<()> {
    out.write_all(output.as_bytes())?;
    out.flush()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    zero_utils::init_tracing_with(&LoggingConfig::default().with_format(args.log_format))?;

    let lm = args.build_model()?;
    info!(provider = %lm.provider(), "Starting zero");

    let input = read_input(args.input.clone(), tokio::io::stdin()).await?;
    debug!(input_len = input.len(), "prompting");

    let output = lm
        .prompt_with_timeout(input, Duration::from_secs(args.timeout_secs))
        .await?;
    write_output(&mut std::io::stdout().lock(), &output).context("failed to write output")?;

    Ok(())
}
