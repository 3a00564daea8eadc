use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreenCodeError {
    #[error("Input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing API credential: {var} is not set")]
    MissingCredential { var: String },

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Malformed completion response: {message}")]
    MalformedResponse { message: String },

    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Upstream,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GreenCodeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileNotFound { .. } | Self::ReadError { .. } => ErrorCategory::Input,
            Self::MissingCredential { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::TransportError(_) => ErrorCategory::Network,
            Self::UpstreamError { .. } | Self::MalformedResponse { .. } => ErrorCategory::Upstream,
            Self::WriteError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TransportError(_) => ErrorSeverity::Medium,
            Self::UpstreamError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            Self::WriteError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Transport faults, rate limiting and server-side failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TransportError(_) => true,
            Self::UpstreamError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FileNotFound { path } => format!("Cannot find input file {}", path.display()),
            Self::ReadError { path, .. } => format!("Cannot read {} as text", path.display()),
            Self::MissingCredential { var } => format!("No API key found in {}", var),
            Self::TransportError(e) if e.is_timeout() => {
                "The completion endpoint did not answer in time".to_string()
            }
            Self::TransportError(_) => "Could not reach the completion endpoint".to_string(),
            Self::UpstreamError { status, .. } => {
                format!("The completion endpoint rejected the request (HTTP {})", status)
            }
            Self::MalformedResponse { .. } => {
                "The completion endpoint returned an unexpected response".to_string()
            }
            Self::WriteError { path, .. } => format!("Cannot write output to {}", path.display()),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::FileNotFound { .. } => "Check the input path and try again".to_string(),
            Self::ReadError { .. } => {
                "Make sure the file is readable and UTF-8 encoded".to_string()
            }
            Self::MissingCredential { var } => format!(
                "Export {} or add it to a .env file (see --env-file)",
                var
            ),
            Self::TransportError(_) => {
                "Check your network connection, or raise --timeout / --max-retries".to_string()
            }
            Self::UpstreamError { status: 401, .. } | Self::UpstreamError { status: 403, .. } => {
                "Verify that the API key is valid for this endpoint".to_string()
            }
            Self::UpstreamError { status: 429, .. } => {
                "You are being rate limited; wait a moment and retry".to_string()
            }
            Self::UpstreamError { .. } => {
                "Check the model name and endpoint, then retry".to_string()
            }
            Self::MalformedResponse { .. } => {
                "Make sure --endpoint points at an OpenAI-compatible chat completion API"
                    .to_string()
            }
            Self::WriteError { .. } => {
                "Check that the output directory exists and is writable".to_string()
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the command-line flags or the config file and retry".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GreenCodeError>;
