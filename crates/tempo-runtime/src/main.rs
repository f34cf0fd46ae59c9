//! tempod - line-oriented timer host
//!
//! Reads one JSON command per line on stdin and answers with one JSON line
//! on stdout. Timer notifications are streamed to stdout as they happen.
//! Logs go to stderr.

use std::process::ExitCode;

use tempo_runtime::{execute_line, init_tracing, RuntimeConfig, RuntimeResult, TimerService};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match RuntimeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tempod: {}", e);
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.log);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("tempod stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: RuntimeConfig) -> RuntimeResult<()> {
    let (mut service, mut events) = TimerService::in_memory(config);

    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => tracing::warn!("cannot encode {} event: {}", event.name(), e),
                },
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "notification output fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    service.start();
    tracing::info!(tick_interval = ?service.config().tick_interval, "tempod ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let outcome: RuntimeResult<()> = loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => println!("{}", execute_line(service.registry(), &line)),
            Ok(None) => break Ok(()),
            Err(e) => break Err(e.into()),
        }
    };

    service.shutdown().await;
    // Dropping the service closes the notification channel
    drop(service);
    if let Err(e) = printer.await {
        tracing::warn!("notification printer ended abnormally: {}", e);
    }

    outcome
}
