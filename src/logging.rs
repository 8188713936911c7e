use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (tests, embedding apps)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Append a timestamped line to the failure log. Returns whether the line
/// was written; a failure is only reported through `tracing`.
pub fn log_failure(log_path: &Path, message: &str) -> bool {
    match append_line(log_path, message) {
        Ok(()) => true,
        Err(e) => {
            warn!("Cannot write failure log {}: {}", log_path.display(), e);
            false
        }
    }
}

fn append_line(log_path: &Path, message: &str) -> std::io::Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(file, "[{}] {}", timestamp, message)
}
