//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/bossfight/bossfight.log` (or platform
//! equivalent) with 10 MB size-based rotation. Stdout stays quiet so the
//! prompt is readable; set `DEBUG_LOGGING=1` to mirror debug output there.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEBUG_DIRECTIVE: &str = "info,bossfight_core=debug,bossfight_cli=debug";

/// Initialize logging.
///
/// Returns a `WorkerGuard` that MUST be held for the application lifetime
/// to ensure all buffered logs are flushed on shutdown.
///
/// # Fallback
/// If the log file cannot be created, returns `None` and logs to stdout only.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let Some(log_dir) = dirs::config_dir().map(|config| config.join("bossfight")) else {
        init_stdout_only(debug_logging);
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Can't use tracing yet since subscriber not initialized
        eprintln!(
            "Failed to create log directory {:?}: {}, using stdout only",
            log_dir, e
        );
        init_stdout_only(debug_logging);
        return None;
    }

    // 10 MB, keep only bossfight.log and bossfight.log.1
    let log_path = log_dir.join("bossfight.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(10 * 1024 * 1024),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stdout_only(debug_logging);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let stdout_layer = debug_logging.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .with(filter(debug_logging))
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "Boss fight logging initialized");

    Some(guard)
}

fn filter(debug_logging: bool) -> EnvFilter {
    EnvFilter::new(if debug_logging { DEBUG_DIRECTIVE } else { "info" })
}

/// Fallback: Initialize stdout-only logging when file logging fails.
fn init_stdout_only(debug_logging: bool) {
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(filter(debug_logging))
        .init();
}
