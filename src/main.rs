use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use churn_serve::server::ApiServer;
use churn_serve::utils::{logger, validation::Validate};
use churn_serve::{CliConfig, ConfigProvider, InferenceService, ServerSettings};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    logger::init_cli_logger(cli.verbose, cli.log_json);

    tracing::info!("Starting churn-serve");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match ServerSettings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // The one-time artifact load. A missing or corrupt artifact leaves the
    // process serving in degraded mode rather than exiting.
    let service = InferenceService::from_artifact(settings.model_path());
    if !service.is_ready() {
        tracing::warn!(
            model_path = settings.model_path(),
            "Serving without a model; every /predict will answer 503 until restart"
        );
    }

    let server = ApiServer::bind(settings.bind_addr(), Arc::new(service))
        .with_context(|| format!("failed to start server on {}", settings.bind_addr()))?;

    tracing::info!(bind = settings.bind_addr(), "Listening for requests");
    server.run();

    Ok(())
}
