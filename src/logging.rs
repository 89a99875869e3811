//! File logging bootstrap.
//!
//! Logs go to `<data_dir>/logs/tk_*.log`, never to the terminal, so they do
//! not tear the full-screen UI. The level comes from `$TICKOFF_LOG`.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "TICKOFF_LOG";

const LOG_FILE_BASENAME: &str = "tk";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unsupported log level '{0}'; expected trace|debug|info|warn|error|off")]
    BadLevel(String),
    #[error("could not create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not start logger: {0}")]
    Start(#[from] flexi_logger::FlexiLoggerError),
}

/// Start file logging under `data_dir`. Keep the handle alive for the life
/// of the process; dropping it flushes and stops logging.
pub fn init_logging(data_dir: &Path, level: Option<&str>) -> Result<LoggerHandle, LoggingError> {
    let level = normalize_level(level.unwrap_or("info"))?;
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).map_err(|e| LoggingError::CreateDir {
        path: log_dir.clone(),
        source: e,
    })?;

    let handle = Logger::try_with_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    log::info!(
        "event=start version={} level={} data_dir={}",
        env!("CARGO_PKG_VERSION"),
        level,
        data_dir.display()
    );
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(LoggingError::BadLevel(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_normalized() {
        assert_eq!(normalize_level(" WARNING ").unwrap(), "warn");
        assert_eq!(normalize_level("Debug").unwrap(), "debug");
        assert_eq!(normalize_level("off").unwrap(), "off");
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(matches!(
            normalize_level("chatty"),
            Err(LoggingError::BadLevel(l)) if l == "chatty"
        ));
    }
}
