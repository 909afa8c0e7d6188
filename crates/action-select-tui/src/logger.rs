//! Session log for the palette host.
//!
//! The terminal belongs to the palette while it is open, so everything goes
//! to a timestamped `action-select-*.log` file instead: the working directory
//! in debug builds, the cache directory in release builds.
//! `ACTION_SELECT_LOG` picks the level, falling back to `RUST_LOG`.

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Where the session is logged and how verbosely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub path: PathBuf,
    pub level: LevelFilter,
}

fn log_file_name() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    format!("action-select-{}.log", timestamp)
}

fn log_file_path(file_name: String) -> PathBuf {
    if cfg!(debug_assertions) {
        return PathBuf::from(file_name);
    }
    action_select_config::paths::cache_dir()
        .map(|dir| dir.join(&file_name))
        .unwrap_or_else(|_| PathBuf::from(file_name))
}

/// Level from the first set variable; unknown names mean Info.
fn resolve_level(own: Option<&str>, rust_log: Option<&str>) -> LevelFilter {
    let Some(value) = own.or(rust_log) else {
        return if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
    };
    match value.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn open_log(path: &Path, level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c)
        .build();
    let file = File::create(path).expect("Failed to create log file");
    WriteLogger::init(level, config, file).expect("Failed to initialize logger");
}

/// Open the session log and record where it lives.
pub fn init() -> LogTarget {
    let own = std::env::var("ACTION_SELECT_LOG").ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let target = LogTarget {
        path: log_file_path(log_file_name()),
        level: resolve_level(own.as_deref(), rust_log.as_deref()),
    };

    open_log(&target.path, target.level);
    log::info!(
        "action-select {} logging at {} to {}",
        env!("CARGO_PKG_VERSION"),
        target.level,
        target.path.display()
    );
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level_prefers_own_variable() {
        assert_eq!(resolve_level(Some("warn"), Some("trace")), LevelFilter::Warn);
        assert_eq!(resolve_level(None, Some("TRACE")), LevelFilter::Trace);
        assert_eq!(resolve_level(Some(" off "), None), LevelFilter::Off);
    }

    #[test]
    fn test_resolve_level_unknown_is_info() {
        assert_eq!(resolve_level(Some("verbose"), None), LevelFilter::Info);
    }

    #[test]
    fn test_resolve_level_default() {
        let expected = if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        assert_eq!(resolve_level(None, None), expected);
    }

    #[test]
    fn test_log_file_name() {
        let name = log_file_name();
        assert!(name.starts_with("action-select-"));
        assert!(name.ends_with(".log"));
        // Debug test builds log next to the working directory
        if cfg!(debug_assertions) {
            assert_eq!(log_file_path(name.clone()), PathBuf::from(name));
        }
    }
}
