use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".action-select.toml";

/// Load config file content
///
/// Searches, in order:
/// 1. `.action-select.toml` in the current working directory
/// 2. `.action-select.toml` in the home directory
/// 3. `config.toml` in the platform config directory
///
/// Returns the content of the first file found, None otherwise.
pub fn load_config_file() -> Option<String> {
    config_file_candidates().into_iter().find_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(content)
    })
}

fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home) = env::var_os("HOME") {
        candidates.push(PathBuf::from(home).join(CONFIG_FILE));
    }
    if let Ok(path) = crate::paths::app_config_path() {
        candidates.push(path);
    }
    candidates
}
