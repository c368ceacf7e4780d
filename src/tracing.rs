//! Logging setup
//!
//! Console output goes to stderr so stdout stays free for buffer contents
//! and `--json` reports. Filtering:
//! - `RUST_LOG` wins when set, e.g. `RUST_LOG=carve::action=debug`
//! - otherwise `-v` picks the level (see [`default_directive`])
//!
//! A copy of every event at debug level or above also goes to
//! `~/.config/carve/logs/carve.log`, rotated daily.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Console filter for a `-v` count, used when RUST_LOG is not set
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Level written to the log file; never quieter than debug
fn file_directive(verbosity: u8) -> &'static str {
    if verbosity >= 2 {
        "trace"
    } else {
        "debug"
    }
}

/// Install the global subscriber. Returns whether file logging is active.
pub fn init(verbosity: u8) -> bool {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let file = crate::config_paths::ensure_logs_dir()
        .map_err(|e| eprintln!("carve: file logging disabled: {}", e))
        .ok()
        .map(|logs_dir| {
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(logs_dir, "carve.log"))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new(file_directive(verbosity)))
        });
    let file_logging = file.is_some();

    tracing_subscriber::registry().with(console).with(file).init();
    file_logging
}
