pub mod cli;
pub mod credentials;
pub mod toml_config;

use crate::adapters::http::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::adapters::retry::RetryPolicy;
use crate::core::output::default_output_path;
use crate::core::ConfigProvider;
use crate::utils::error::{GreenCodeError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use credentials::DEFAULT_API_KEY_ENV;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

#[derive(Debug, Clone, Parser)]
#[command(name = "green-code")]
#[command(about = "Rewrite a source file for lower CPU, memory and energy use with an LLM")]
#[command(version)]
pub struct CliConfig {
    /// Source file to analyze
    pub input: PathBuf,

    /// Where to write the result (default: <input>_sustainable.<ext>)
    #[arg(short, long, conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Overwrite the input file with the result
    #[arg(long)]
    pub in_place: bool,

    /// TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Env file to load before reading the API key (default: ./.env if present)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Chat-completion endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Retries for transient failures (0 disables retrying)
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Environment variable holding the API key
    #[arg(long)]
    pub api_key_env: Option<String>,

    /// Print the prompt and destination without calling the API
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Reads the `--config` file, if one was given.
    pub fn load_file_config(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)
            }
            None => Ok(TomlConfig::default()),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub api_key_env: String,
    pub dry_run: bool,
}

impl Settings {
    /// CLI flags win over the settings file, which wins over built-in defaults.
    pub fn resolve(cli: &CliConfig, file: &TomlConfig) -> Self {
        let output = if cli.in_place {
            cli.input.clone()
        } else {
            cli.output
                .clone()
                .unwrap_or_else(|| default_output_path(&cli.input))
        };

        let default_retry = RetryPolicy::default();
        let retry = RetryPolicy {
            max_retries: cli
                .max_retries
                .or(file.retry.max_retries)
                .unwrap_or(default_retry.max_retries),
            initial_backoff: file
                .retry
                .initial_backoff_ms
                .map(Duration::from_millis)
                .unwrap_or(default_retry.initial_backoff),
            max_backoff: file
                .retry
                .max_backoff_ms
                .map(Duration::from_millis)
                .unwrap_or(default_retry.max_backoff),
        };

        Self {
            input: cli.input.clone(),
            output,
            endpoint: cli
                .endpoint
                .clone()
                .or_else(|| file.api.endpoint.clone())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: cli
                .model
                .clone()
                .or_else(|| file.api.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: cli
                .temperature
                .or(file.api.temperature)
                .unwrap_or(DEFAULT_TEMPERATURE),
            timeout: cli
                .timeout
                .or(file.api.timeout_seconds)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            retry,
            api_key_env: cli
                .api_key_env
                .clone()
                .or_else(|| file.api.api_key_env.clone())
                .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
            dry_run: cli.dry_run,
        }
    }

    /// Settings with defaults for everything but the paths.
    pub fn for_paths(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            dry_run: false,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output", &self.output)?;
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_range("temperature", self.temperature, 0.0, 2.0)?;
        validation::validate_positive_number("timeout", self.timeout.as_secs(), 1)?;
        validation::validate_non_empty_string("api_key_env", &self.api_key_env)?;

        if self.retry.max_backoff < self.retry.initial_backoff {
            return Err(GreenCodeError::InvalidConfigValueError {
                field: "retry.max_backoff_ms".to_string(),
                value: self.retry.max_backoff.as_millis().to_string(),
                reason: "must not be smaller than retry.initial_backoff_ms".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn input_path(&self) -> &Path {
        &self.input
    }

    fn output_path(&self) -> &Path {
        &self.output
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f64 {
        self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("green-code").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["src/app.py"]);
        let settings = Settings::resolve(&cli, &TomlConfig::default());

        assert_eq!(settings.input, PathBuf::from("src/app.py"));
        assert_eq!(settings.output, PathBuf::from("src/app_sustainable.py"));
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.model, "llama3-70b-8192");
        assert_eq!(settings.temperature, 0.2);
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.retry, RetryPolicy::default());
        assert_eq!(settings.api_key_env, "GROQ_API_KEY");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[api]
model = "llama3-8b-8192"
temperature = 0.7
timeout_seconds = 10

[retry]
max_retries = 5
initial_backoff_ms = 100
"#,
        )
        .unwrap();
        let cli = parse(&["app.py", "--model", "mixtral-8x7b-32768", "--max-retries", "0"]);

        let settings = Settings::resolve(&cli, &file);

        assert_eq!(settings.model, "mixtral-8x7b-32768");
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.retry.max_retries, 0);
        assert_eq!(settings.retry.initial_backoff, Duration::from_millis(100));
    }

    #[test]
    fn test_output_selection() {
        let explicit = Settings::resolve(
            &parse(&["app.py", "-o", "out/green.py"]),
            &TomlConfig::default(),
        );
        assert_eq!(explicit.output, PathBuf::from("out/green.py"));

        let in_place = Settings::resolve(&parse(&["app.py", "--in-place"]), &TomlConfig::default());
        assert_eq!(in_place.output, PathBuf::from("app.py"));

        let conflict = CliConfig::try_parse_from(["green-code", "a.py", "-o", "b.py", "--in-place"]);
        assert!(conflict.is_err());
    }

    #[test]
    fn test_input_is_required() {
        assert!(CliConfig::try_parse_from(["green-code"]).is_err());
    }

    #[test]
    fn test_invalid_settings() {
        let mut settings = Settings::for_paths("a.py", "b.py");
        settings.temperature = 4.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::for_paths("a.py", "b.py");
        settings.endpoint = "not a url".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::for_paths("a.py", "b.py");
        settings.retry.max_backoff = Duration::from_millis(1);
        assert!(settings.validate().is_err());
    }
}
