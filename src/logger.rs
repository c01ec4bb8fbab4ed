// This file implements the application's logging system.
// It provides macros for the different log levels (INFO, WARN, ERROR, DEBUG)
// which emit `tracing` events, and installs the `tracing-subscriber` that
// renders them on stderr.

use tracing::Level;

// Re-exported so the exported macros resolve `tracing` from any crate that uses them.
#[doc(hidden)]
pub use tracing;

/// Provides convenient logging macros.
/// `#[macro_export]` makes these macros globally available within the crate
/// and to the `el-hornito` binary.

// `log_info!` for general application progress and informational messages.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => ($crate::logger::tracing::info!("{}", format!($($arg)*)));
}

// `log_warn!` for non-critical issues, such as falling back to default settings.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => ($crate::logger::tracing::warn!("{}", format!($($arg)*)));
}

// `log_error!` for failures the user should know about.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => ($crate::logger::tracing::error!("{}", format!($($arg)*)));
}

// `log_debug!` for detailed internal tracing.
// Only rendered when the subscriber was installed with `debug = true`.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => ($crate::logger::tracing::debug!("{}", format!($($arg)*)));
}

/// Initializes the logger, installing a stderr `fmt` subscriber.
/// This function should be called once at application startup; later calls
/// leave the first subscriber in place.
///
/// # Arguments
/// * `debug`: If `true`, enables debug logging; otherwise, only info, warn, and error messages are printed.
pub fn init(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };

    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok();

    if installed {
        log_debug!("Logger initialized in DEBUG mode");
    }
}
