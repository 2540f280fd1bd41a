use std::path::PathBuf;

/// Returns the base directory for session server data.
///
/// Uses `$A3S_SESSION_HOME` if set, otherwise defaults to `~/.a3s/session`.
pub fn session_home() -> PathBuf {
    if let Ok(home) = std::env::var("A3S_SESSION_HOME") {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".a3s")
        .join("session")
}

/// Returns the path to the user configuration file.
pub fn config_path() -> PathBuf {
    session_home().join("config.toml")
}
