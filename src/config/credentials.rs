use crate::utils::error::{GreenCodeError, Result};
use std::fmt;
use std::path::Path;

pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Bearer token for the completion endpoint. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Looks the key up by variable name. Blank values count as missing.
pub fn resolve_api_key<F>(var_name: &str, lookup: F) -> Result<ApiKey>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        Some(value) if !value.trim().is_empty() => Ok(ApiKey::new(value.trim())),
        _ => Err(GreenCodeError::MissingCredential {
            var: var_name.to_string(),
        }),
    }
}

/// Loads variables from an env file into the process environment. Variables
/// that are already set win over the file.
///
/// An explicit path must exist; without one, `.env` in the working directory
/// is used when present.
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|e| GreenCodeError::ConfigError {
                message: format!("cannot load env file {}: {}", path.display(), e),
            })?;
            tracing::debug!("Loaded environment from {}", path.display());
        }
        None => match dotenvy::dotenv() {
            Ok(found) => tracing::debug!("Loaded environment from {}", found.display()),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(GreenCodeError::ConfigError {
                    message: format!("cannot parse .env: {}", e),
                })
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_present_key() {
        let vars = env(&[("GROQ_API_KEY", " gsk_test \n")]);
        let key = resolve_api_key(DEFAULT_API_KEY_ENV, |name| vars.get(name).cloned()).unwrap();
        assert_eq!(key.expose(), "gsk_test");
    }

    #[test]
    fn test_resolve_missing_or_blank_key() {
        let vars = env(&[("GROQ_API_KEY", "   ")]);
        let blank = resolve_api_key(DEFAULT_API_KEY_ENV, |name| vars.get(name).cloned());
        assert!(matches!(
            blank,
            Err(GreenCodeError::MissingCredential { ref var }) if var == "GROQ_API_KEY"
        ));

        let missing = resolve_api_key("OTHER_KEY", |_| None);
        assert!(matches!(missing, Err(GreenCodeError::MissingCredential { .. })));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("gsk_secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }

    #[test]
    fn test_explicit_env_file_must_exist() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_env_file(Some(dir.path().join("missing.env").as_path()));
        assert!(matches!(result, Err(GreenCodeError::ConfigError { .. })));
    }
}
