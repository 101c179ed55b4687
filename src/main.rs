use clap::Parser;
use monitor_dash::config::OutputSettings;
use monitor_dash::core::{ConfigProvider, Storage};
use monitor_dash::utils::error::ErrorSeverity;
use monitor_dash::utils::{logger, validation::Validate};
use monitor_dash::{
    output, CliConfig, DashError, HealthCheck, HttpFetcher, LoadOutcome, LocalStorage,
    PageLoader, TomlConfig,
};
use std::sync::Arc;

struct RunOptions {
    output: OutputSettings,
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting monitor-dash");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => {
                    let options = RunOptions {
                        output: cli.output_settings(Some(&config)),
                        health: cli.health,
                    };
                    run(&config, &options).await
                }
                Err(e) => Err(e),
            }
        }
        None => {
            let options = RunOptions {
                output: cli.output_settings(None),
                health: cli.health,
            };
            run(&cli, &options).await
        }
    };

    match result {
        Ok(true) => Ok(()),
        Ok(false) => {
            // 兩個請求都沒有資料，交由外層顯示錯誤狀態
            eprintln!("❌ No data could be loaded from the backend");
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!(
                "❌ Load failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

/// Returns whether any data was loaded.
async fn run<C: ConfigProvider + Validate>(
    config: &C,
    options: &RunOptions,
) -> Result<bool, DashError> {
    config.validate()?;
    tracing::info!("✅ Configuration validated, backend: {}", config.base_url());

    let fetcher = Arc::new(HttpFetcher::from_config(config)?);

    if options.health {
        let health = HealthCheck::new(fetcher.clone(), config.health_path());
        match health.check().await? {
            LoadOutcome::Loaded(status) if status.is_ok() => {
                tracing::info!("Backend health: {}", status.health)
            }
            LoadOutcome::Loaded(status) => tracing::warn!("Backend health: {}", status.health),
            LoadOutcome::Failed { reason, .. } => {
                tracing::warn!("Health check failed: {}", reason)
            }
            LoadOutcome::NotRequested => {}
        }
    }

    let state = PageLoader::from_config(fetcher, config).run().await?;
    let rendered = output::render(&state, options.output.format)?;

    match &options.output.path {
        Some(path) => {
            LocalStorage::new(".".to_string())
                .write_file(path, rendered.as_bytes())
                .await?;
            tracing::info!("📁 Output saved to: {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(!state.is_empty())
}
