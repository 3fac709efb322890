use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "./logs/size-trim.log";

/// Our own events at info, dependencies only when they warn.
const DEFAULT_FILTER: &str = "warn,size_trim=info";

/// Logs go to stderr and to a file; stdout stays free for the prompts.
pub fn init_logger() -> impl Drop {
    let filter_layer = env::var("TRACING_LEVEL")
        .map(|level| EnvFilter::new(level_directive(&level)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let log_file_path =
        env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let (log_dir, log_name) = split_log_path(Path::new(&log_file_path));
    let dir_error = fs::create_dir_all(&log_dir).err();

    let file_appender = tracing_appender::rolling::never(&log_dir, log_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_target(false)
                .without_time()
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(filter_layer)
        .init();

    if let Some(e) = dir_error {
        warn!("Could not create log directory {}: {}", log_dir.display(), e);
    }
    debug!("Logging to stderr and {}", log_file_path);

    guard
}

/// A bare level such as `debug` applies to this crate only; anything else is
/// taken as a full filter directive.
fn level_directive(level: &str) -> String {
    let level = level.trim();
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => {
            format!("warn,size_trim={}", level.to_ascii_lowercase())
        }
        _ => level.to_string(),
    }
}

/// Directory and file name of the log file; a bare name lands in `.`.
fn split_log_path(path: &Path) -> (PathBuf, OsString) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "size-trim.log".into());
    (dir, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        assert_eq!(
            split_log_path(Path::new("./logs/size-trim.log")),
            (PathBuf::from("./logs"), OsString::from("size-trim.log"))
        );
        assert_eq!(
            split_log_path(Path::new("run.log")),
            (PathBuf::from("."), OsString::from("run.log"))
        );
        assert_eq!(
            split_log_path(Path::new("/var/log/trim/")),
            (PathBuf::from("/var/log"), OsString::from("trim"))
        );
    }

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "warn,size_trim=debug");
        assert_eq!(level_directive(" info "), "warn,size_trim=info");
        assert_eq!(level_directive("walkdir=trace,info"), "walkdir=trace,info");
    }
}
