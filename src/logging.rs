//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout carries nothing but report lines. With a log
//! file, a JSON layer is added on a non-blocking writer.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("version_report=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    })
}

/// Initializes logging. The returned guard must be held until exit so the
/// file writer is flushed.
pub fn init(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    let Some(log_file) = log_file else {
        tracing_subscriber::registry()
            .with(default_filter(verbose))
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    let dir = log_file
        .parent()
        .context("log file path has no parent directory")?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file_name = log_file
        .file_name()
        .context("log file path has no file name")?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));

    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(stderr_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .json(),
        )
        .init();

    Ok(Some(guard))
}
