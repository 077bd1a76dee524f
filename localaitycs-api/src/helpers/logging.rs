use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize stdout logging, plus a daily rolling file when `directory` is set.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process.
pub fn init_logging(verbose: bool, directory: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let default_level = if verbose { "debug" } else { "info" };

    // Can be overridden with RUST_LOG environment variable
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow::anyhow!("Failed to create log filter: {}", e))?;

    let stdout_layer = fmt::layer().with_target(false).compact();

    let (file_layer, guard) = match directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "localaitycs-api.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}
