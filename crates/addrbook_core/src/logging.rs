//! Address book logging bootstrap.
//!
//! # Responsibility
//! - Initialize file-based rolling logs at most once per process.
//! - Capture panics into the log with a sanitized payload.
//!
//! # Invariants
//! - Re-initializing with the same level and directory is a no-op.
//! - Re-initializing with a different level or directory is rejected.
//! - Initialization never panics.
//! - Log lines carry metadata only; phone numbers are never logged.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "addrbook";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const PANIC_TEXT_LIMIT: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: LevelFilter,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Starts rolling file logs under `log_dir` at `level`.
///
/// # Errors
/// - `level` is not one of trace|debug|info|warn|error.
/// - `log_dir` is not absolute or cannot be created.
/// - Logger backend failed to start.
/// - Logging is already active with a different level or directory.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<(), String> {
    let level = parse_level(level)?;
    let log_dir = log_dir.as_ref();
    if !log_dir.is_absolute() {
        return Err(format!(
            "log_dir must be an absolute path, got `{}`",
            log_dir.display()
        ));
    }

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, log_dir))?;
    if state.log_dir != log_dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        ));
    }
    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, level
        ));
    }
    Ok(())
}

/// Returns `(level, log_dir)` when logging is active.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: LevelFilter, log_dir: &Path) -> Result<LoggingState, String> {
    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        )
    })?;

    let spec = LogSpecification::builder().default(level).build();
    let logger = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
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
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    log_panics_to_file();
    info!(
        "event=app_start module=core status=ok platform={} version={} level={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level
    );

    Ok(LoggingState {
        level,
        log_dir: log_dir.to_path_buf(),
        _logger: logger,
    })
}

/// Accepts the level names `log` knows, in any case, except `off`.
fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    let raw = raw.trim();
    match raw.parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => Err(format!(
            "log level `{raw}` is not one of trace|debug|info|warn|error"
        )),
        Ok(level) => Ok(level),
    }
}

// Runs once, from the `LOGGING_STATE` initializer. The stderr report of
// the previous hook still follows the log line.
fn log_panics_to_file() {
    let stderr_report = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        let text = one_line(&panic_text(panic_info.payload()), PANIC_TEXT_LIMIT);
        error!("event=panic_captured module=core status=error location={location} payload={text}");
        stderr_report(panic_info);
    }));
}

fn panic_text(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "<opaque payload>".to_string())
}

/// Collapses whitespace runs (line breaks included) to single spaces and cuts
/// the result at `limit` chars, marking the cut with `...`.
fn one_line(text: &str, limit: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, one_line, panic_text, parse_level};
    use log::LevelFilter;

    #[test]
    fn parse_level_accepts_log_names_in_any_case() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level(" Warn ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("trace").unwrap(), LevelFilter::Trace);
    }

    #[test]
    fn parse_level_refuses_off_and_unknown_names() {
        assert!(parse_level("off").is_err());
        let message = parse_level("verbose").unwrap_err();
        assert!(message.contains("`verbose`"));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let error = init_logging("info", "logs/dev").expect_err("relative path must fail");
        assert!(error.contains("absolute"));
    }

    #[test]
    fn one_line_flattens_breaks_and_cuts_long_text() {
        assert_eq!(one_line("line1\nline2\r\nline3", 100), "line1 line2 line3");
        assert_eq!(one_line("abcdefghij", 4), "abcd...");
        assert_eq!(one_line("żółw", 4), "żółw");
    }

    #[test]
    fn panic_text_reads_string_payloads() {
        let borrowed: Box<dyn std::any::Any + Send> = Box::new("boom");
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        let opaque: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_text(borrowed.as_ref()), "boom");
        assert_eq!(panic_text(owned.as_ref()), "bang");
        assert_eq!(panic_text(opaque.as_ref()), "<opaque payload>");
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let log_dir = tempfile::tempdir().unwrap();
        let other_dir = tempfile::tempdir().unwrap();

        init_logging("info", log_dir.path()).expect("first init should succeed");
        init_logging("INFO", log_dir.path()).expect("same config should be idempotent");

        let level_error = init_logging("debug", log_dir.path()).unwrap_err();
        assert!(level_error.contains("refusing to switch"));
        let dir_error = init_logging("info", other_dir.path()).unwrap_err();
        assert!(dir_error.contains("refusing to switch"));

        let (level, dir) = logging_status().expect("logging should be active");
        assert_eq!(level, LevelFilter::Info);
        assert_eq!(dir, log_dir.path());
    }
}
