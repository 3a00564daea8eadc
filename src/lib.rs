pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use self::adapters::{ChatCompletionClient, RetryPolicy};
pub use self::config::{cli::LocalStorage, CliConfig, Settings};
pub use self::core::{engine::SustainabilityEngine, pipeline::SustainablePipeline};
pub use self::utils::error::{GreenCodeError, Result};
