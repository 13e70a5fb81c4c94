use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// `<cache dir>/taskdeck/taskdeck.log`, or the temp dir if there is no cache dir
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("taskdeck")
        .join("taskdeck.log")
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Log to stderr. Used by the CLI subcommands.
///
/// `RUST_LOG` wins over `level`. Calling this more than once is a no-op.
pub fn init_stderr(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Log to an append-only file. The TUI owns the terminal, so stderr is out.
pub fn init_file(level: &str, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .try_init();
    Ok(())
}
