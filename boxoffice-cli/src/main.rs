use std::process::ExitCode;
use std::sync::Arc;
use anyhow::Context;
use boxoffice_cli::{BatchDriver, Cli};
use boxoffice_order::parse_request_file;
use boxoffice_store::{app_config::Config, Blake3Hasher, FileSnapshotRepository};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, config_error) = Config::load_or_default();
    init_tracing(&config, cli.verbose);
    if let Some(e) = config_error {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }

    let text = tokio::fs::read_to_string(&cli.file)
        .await
        .with_context(|| format!("Unable to process ticket requests from {}", cli.file.display()))?;
    let input = parse_request_file(&text);

    let data_dir = cli.data_dir.unwrap_or(config.storage.data_dir);
    let persist = config.storage.enabled && !cli.no_save;
    tracing::debug!("Snapshot directory {}, saving {}", data_dir.display(), persist);

    let driver = BatchDriver::new(
        Arc::new(FileSnapshotRepository::new(data_dir)),
        Arc::new(Blake3Hasher),
    )
    .verbose(cli.verbose)
    .persist(persist);

    let mut out = std::io::stdout().lock();
    driver.run(input, &mut out).await?;

    Ok(())
}

const LOG_TARGETS: [&str; 5] = [
    "boxoffice",
    "boxoffice_cli",
    "boxoffice_core",
    "boxoffice_order",
    "boxoffice_store",
];

fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Logs go to stderr so stdout carries only the report
fn init_tracing(config: &Config, verbose: bool) {
    let fallback = config
        .logging
        .filter
        .clone()
        .unwrap_or_else(|| default_filter(verbose));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
