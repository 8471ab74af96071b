//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Initialize the `log` backend exactly once per process.
//! - Route records to rolling files or to stderr.
//!
//! # Invariants
//! - Init is idempotent for the same level and target.
//! - Re-initialization with a different level or target is rejected.
//! - Initialization never panics.
//! - Short-lived hosts call `flush_logging` before exit; buffered file records
//!   are otherwise lost because the handle lives in a static.
//! - Core events are metadata-only `key=value` lines; no task text.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "txthours";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Absolute directory holding size-rotated log files.
    Directory(PathBuf),
}

impl LogTarget {
    /// Builds a target from an optional directory string.
    ///
    /// `None` or a blank string selects stderr.
    ///
    /// # Errors
    /// Returns an error when the directory is not absolute.
    pub fn from_dir(log_dir: Option<&str>) -> Result<Self, String> {
        match log_dir.map(str::trim) {
            None | Some("") => Ok(Self::Stderr),
            Some(trimmed) => {
                let path = Path::new(trimmed);
                if !path.is_absolute() {
                    return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
                }
                Ok(Self::Directory(path.to_path_buf()))
            }
        }
    }
}

impl Display for LogTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => write!(f, "stderr"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

struct LoggingState {
    level: &'static str,
    target: LogTarget,
    logger: LoggerHandle,
}

/// Initializes logging with a level and target.
///
/// # Errors
/// - Unsupported `level`.
/// - A directory target that cannot be created.
/// - Logger backend setup failure.
/// - A conflicting earlier initialization.
pub fn init_logging(level: &str, target: LogTarget) -> Result<(), String> {
    let normalized_level = normalize_level(level)?;

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(normalized_level, &target))?;
    ensure_same_config(state, normalized_level, &target)
}

/// Returns the active `(level, target)`, or `None` before initialization.
pub fn logging_status() -> Option<(&'static str, LogTarget)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.target.clone()))
}

/// Flushes buffered records to the active target.
///
/// No-op before initialization.
pub fn flush_logging() {
    if let Some(state) = LOGGING_STATE.get() {
        state.logger.flush();
    }
}

/// Default level for the current build mode: `debug` or `info`.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, target: &LogTarget) -> Result<LoggingState, String> {
    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?;

    let logger = match target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format),
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
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
        }
    };

    let handle = logger
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once(target.clone());

    info!(
        "event=logging_init module=core status=ok level={} target={} version={}",
        level,
        target,
        env!("CARGO_PKG_VERSION")
    );

    Ok(LoggingState {
        level,
        target: target.clone(),
        logger: handle,
    })
}

fn ensure_same_config(
    state: &LoggingState,
    level: &'static str,
    target: &LogTarget,
) -> Result<(), String> {
    if &state.target != target {
        return Err(format!(
            "logging already initialized for `{}`; refusing to switch to `{}`",
            state.target, target
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

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn install_panic_hook_once(target: LogTarget) {
    if PANIC_HOOK_INSTALLED.get().is_some() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let (module, location) = match panic_info.location() {
            Some(loc) => (
                panic_module(loc.file()),
                format!("{}:{}", loc.file(), loc.line()),
            ),
            None => ("unknown", "unknown".to_string()),
        };
        // Payload may echo task text from the day log; cap and flatten it.
        let payload = panic_payload_summary(panic_info);
        error!(
            "event=panic_captured module={} status=error log_target={} location={} payload={}",
            module, target, location, payload
        );
        flush_logging();
        previous_hook(panic_info);
    }));

    let _ = PANIC_HOOK_INSTALLED.set(());
}

/// Maps a panic's source file to the workspace crate it fired in.
fn panic_module(file: &str) -> &'static str {
    const CRATE_MODULES: [(&str, &str); 3] = [
        ("txthours_core", "core"),
        ("txthours_cli", "cli"),
        ("txthours_ffi", "ffi"),
    ];
    CRATE_MODULES
        .iter()
        .find(|(crate_dir, _)| file.contains(crate_dir))
        .map_or("external", |(_, module)| *module)
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

/// Flattens line breaks and caps `value` at `max_chars` characters.
fn sanitize_message(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars().map(|ch| match ch {
        '\n' | '\r' => ' ',
        other => other,
    });
    let mut summary = chars.by_ref().take(max_chars).collect::<String>();
    if chars.next().is_some() {
        summary.push_str("...");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::{
        flush_logging, init_logging, logging_status, normalize_level, panic_module,
        sanitize_message, LogTarget,
    };
    use crate::service::document_service::process_document;
    use std::path::{Path, PathBuf};

    fn read_log_files(dir: &Path) -> String {
        std::fs::read_dir(dir)
            .expect("log dir should be readable")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("txthours"))
            .map(|entry| std::fs::read_to_string(entry.path()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").expect("INFO should normalize"), "info");
        assert_eq!(
            normalize_level(" warning ").expect("warning should normalize"),
            "warn"
        );
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn target_from_dir_defaults_to_stderr() {
        assert_eq!(LogTarget::from_dir(None), Ok(LogTarget::Stderr));
        assert_eq!(LogTarget::from_dir(Some("  ")), Ok(LogTarget::Stderr));
    }

    #[test]
    fn target_from_dir_rejects_relative_path() {
        let error = LogTarget::from_dir(Some("logs/dev")).expect_err("relative paths must fail");
        assert!(error.contains("absolute"));
    }

    #[test]
    fn sanitize_message_flattens_and_caps_payload() {
        assert_eq!(sanitize_message("line1\nline2\rline3", 8), "line1 li...");
        assert_eq!(sanitize_message("9:00 - ??", 9), "9:00 - ??");
    }

    #[test]
    fn panic_module_names_the_crate_that_panicked() {
        assert_eq!(panic_module("crates/txthours_core/src/resolve.rs"), "core");
        assert_eq!(panic_module("crates/txthours_cli/src/main.rs"), "cli");
        assert_eq!(panic_module("crates/txthours_ffi/src/api.rs"), "ffi");
        assert_eq!(
            panic_module("/home/me/.cargo/registry/src/chrono-0.4/src/naive/date.rs"),
            "external"
        );
    }

    #[test]
    fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
        let log_dir = tempfile::tempdir().expect("temp dir should be created");
        let target = LogTarget::Directory(log_dir.path().to_path_buf());

        init_logging("info", target.clone()).expect("first init should succeed");
        init_logging("INFO", target.clone()).expect("same config should be idempotent");

        let level_error =
            init_logging("debug", target.clone()).expect_err("level conflict should fail");
        assert!(level_error.contains("refusing to switch"));

        let stderr_error =
            init_logging("info", LogTarget::Stderr).expect_err("target conflict should fail");
        assert!(stderr_error.contains("refusing to switch"));

        let (active_level, active_target) = logging_status().expect("logging should be active");
        assert_eq!(active_level, "info");
        assert_eq!(
            active_target,
            LogTarget::Directory(PathBuf::from(log_dir.path()))
        );

        process_document("2025-08-25\n9:00 - 9:20 : Task 1").expect("document should parse");
        process_document("2025-08-25\n9:00 - 9:00 : Task 1").expect_err("zero range should fail");
        flush_logging();

        let logged = read_log_files(log_dir.path());
        assert!(logged.contains("event=logging_init"), "{logged}");
        assert!(logged.contains("event=document_processed"), "{logged}");
        assert!(
            logged.contains("event=document_rejected module=core status=error kind=time_range line=2"),
            "{logged}"
        );
        assert!(!logged.contains("Task 1"), "task text must not be logged");
    }
}
