use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file base path; the console only logs when this is set.
pub const LOG_FILE_ENV: &str = "FLEETDESK_LOG";

/// Where log output goes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogTarget {
    /// The terminal UI owns stdout/stderr, so logs go to a file or nowhere.
    Console,
    /// One-shot commands log warnings to stderr.
    Cli,
}

pub fn init(target: LogTarget) {
    match target {
        LogTarget::Console => init_file(),
        LogTarget::Cli => init_stderr(),
    }
}

/// Each run gets its own file, `{path}.{timestamp}.{pid}`, so concurrent
/// consoles never interleave.
fn init_file() {
    let Ok(log_path) = std::env::var(LOG_FILE_ENV) else {
        return;
    };
    if log_path.trim().is_empty() {
        return;
    }

    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = format!("{}.{}.{}", log_path, timestamp, pid);

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

fn init_stderr() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
