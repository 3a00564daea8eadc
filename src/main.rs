use clap::Parser;
use green_code::app::{self, RunOutcome};
use green_code::config::credentials;
use green_code::utils::logger;
use green_code::utils::validation::Validate;
use green_code::{CliConfig, GreenCodeError, Settings};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting green-code");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match try_main(&config).await {
        Ok(RunOutcome::Written(output_path)) => {
            tracing::info!("✅ File successfully updated with sustainable code");
            println!("✅ Sustainable code written to: {}", output_path.display());
        }
        Ok(RunOutcome::DryRun { prompt, output }) => {
            println!("{}", prompt);
            println!("---");
            println!("📁 Output would be written to: {}", output.display());
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    }
}

async fn try_main(config: &CliConfig) -> green_code::Result<RunOutcome> {
    credentials::load_env_file(config.env_file.as_deref())?;

    let file_config = config.load_file_config()?;
    file_config.validate()?;

    let settings = Settings::resolve(config, &file_config);
    tracing::debug!("Resolved settings: {:?}", settings);

    app::run(&settings, |name| std::env::var(name).ok()).await
}

fn report_failure(e: &GreenCodeError) {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    if let GreenCodeError::UpstreamError { body, .. } = e {
        tracing::debug!("Upstream response body: {}", body);
    }

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}
