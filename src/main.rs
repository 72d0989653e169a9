use clap::Parser;
use portsweep::cli::Cli;
use portsweep::output;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.settings()?;
    init_logging(cli.verbose || settings.verbose);

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping scan");
            on_ctrl_c.cancel();
        }
    });

    cli.execute(&settings, cancel).await?;
    Ok(())
}

/// Logs go to stderr so stdout stays clean for JSON/CSV. `RUST_LOG` wins
/// over the verbosity flag.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "portsweep=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
