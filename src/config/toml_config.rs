use crate::utils::error::{GreenCodeError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid")
});

/// Optional settings file. Every key may be omitted; CLI flags override it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub timeout_seconds: Option<u64>,
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    pub max_retries: Option<u32>,
    pub initial_backoff_ms: Option<u64>,
    pub max_backoff_ms: Option<u64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GreenCodeError::ConfigError {
            message: format!("cannot read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GreenCodeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.api.endpoint {
            validation::validate_url("api.endpoint", endpoint)?;
        }
        if let Some(model) = &self.api.model {
            validation::validate_non_empty_string("api.model", model)?;
        }
        if let Some(temperature) = self.api.temperature {
            validation::validate_range("api.temperature", temperature, 0.0, 2.0)?;
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }
        if let Some(var) = &self.api.api_key_env {
            validation::validate_non_empty_string("api.api_key_env", var)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
endpoint = "https://api.groq.com/openai/v1/chat/completions"
model = "llama3-8b-8192"
temperature = 0.1
timeout_seconds = 30
api_key_env = "MY_GROQ_KEY"

[retry]
max_retries = 4
initial_backoff_ms = 250
max_backoff_ms = 4000
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api.model.as_deref(), Some("llama3-8b-8192"));
        assert_eq!(config.api.temperature, Some(0.1));
        assert_eq!(config.api.timeout_seconds, Some(30));
        assert_eq!(config.api.api_key_env.as_deref(), Some("MY_GROQ_KEY"));
        assert_eq!(config.retry.max_retries, Some(4));
        assert_eq!(config.retry.max_backoff_ms, Some(4000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GREEN_CODE_TEST_ENDPOINT", "https://llm.internal.test/v1/chat");

        let toml_content = r#"
[api]
endpoint = "${GREEN_CODE_TEST_ENDPOINT}"
model = "${GREEN_CODE_TEST_UNSET_MODEL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.api.endpoint.as_deref(),
            Some("https://llm.internal.test/v1/chat")
        );
        assert_eq!(
            config.api.model.as_deref(),
            Some("${GREEN_CODE_TEST_UNSET_MODEL}")
        );

        std::env::remove_var("GREEN_CODE_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[api]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let hot = TomlConfig::from_toml_str("[api]\ntemperature = 3.5\n").unwrap();
        assert!(hot.validate().is_err());

        let no_timeout = TomlConfig::from_toml_str("[api]\ntimeout_seconds = 0\n").unwrap();
        assert!(no_timeout.validate().is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = TomlConfig::from_toml_str("[api]\nmodle = \"typo\"\n");
        assert!(matches!(result, Err(GreenCodeError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nmodel = \"mixtral-8x7b-32768\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.model.as_deref(), Some("mixtral-8x7b-32768"));
    }
}
