use std::path::{Path, PathBuf};

use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file prefix; the appender adds the date
pub const LOG_FILE_NAME: &str = "game-audio.log";

/// Directory logs are written to, under the app's config directory.
///
/// Falls back to `./logs` when the platform has no config directory.
pub fn log_dir(app_dir: Option<&Path>) -> PathBuf {
    app_dir
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Initialize tracing with file and console logging.
///
/// Log rotation:
/// - Daily rotation (new file each day)
/// - Files named: game-audio.log.YYYY-MM-DD
///
/// Log output:
/// - Debug builds: Console + File
/// - Release builds: File only
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn initialize_tracing(app_dir: Option<&Path>) {
    let log_dir = log_dir(app_dir);

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, LOG_FILE_NAME);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!("Log directory: {}", log_dir.display());
}
