//! closure-build - run the closure build pipeline from the command line.

mod args;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use closure_builder::cancellation::CancellationToken;
use closure_builder::pipeline::execute_closure;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = cli.builder_options()?;
    let host = cli.host_context();

    let token = Arc::new(CancellationToken::new());
    {
        let token = Arc::clone(&token);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling build");
                token.cancel("interrupted by Ctrl-C");
            }
        });
    }

    let outcome = execute_closure(&options, &host, &token).await;
    if let Some(status) = host.last_status() {
        info!(status = %status, "Final builder status");
    }

    println!("{}", serde_json::to_string(&outcome)?);

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
