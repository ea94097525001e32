//! dode-webhook binary

mod cli;
mod logging;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing::instrument;

use crate::cli::Cli;
use crate::logging::TracingConfig;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(&TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
    })?;

    run(cli).await
}

#[instrument(name = "dode_webhook", skip_all)]
async fn run(cli: Cli) -> miette::Result<()> {
    let config = cli.webhook_config();
    config.validate().into_diagnostic()?;

    let kube_config = kube::Config::infer()
        .await
        .map_err(|e| miette::miette!("Failed to load kubernetes client config: {e}"))?;

    let shutdown = dode_webhook::shutdown::install_signal_handlers();
    dode_webhook::run(config, kube_config, shutdown)
        .await
        .into_diagnostic()
}
