//! Logging setup
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and to `tower_http` request spans.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Returns the appender guard when logging to
/// files; keep it alive for the life of the process.
pub fn init_logger(
    log_level: &str,
    log_dir: Option<&str>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("pension_server={log_level},tower_http={log_level},security=info"))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir
        && Path::new(dir).is_dir()
    {
        let appender = tracing_appender::rolling::daily(dir, "pension-server");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        builder.with_ansi(false).with_writer(writer).init();
        return Some(guard);
    }

    builder.init();
    None
}
