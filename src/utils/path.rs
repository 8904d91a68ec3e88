use std::path::{Path, PathBuf};

/// Environment variable that redirects the config directory (used by tests)
pub const CONFIG_DIR_ENV: &str = "PODCLIP_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Get the config directory path (~/.config/podclip unless overridden)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    get_home_dir().join(".config").join("podclip")
}

/// Get the config file path
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Get the directory the log file is written to
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("podclip")
}

/// Expand a path typed by the user, handling ~ and relative paths
///
/// Relative paths are resolved against `base` (normally the working directory).
pub fn expand_path(path_str: &str, base: &Path) -> PathBuf {
    let path_str = path_str.trim();

    if let Some(rest) = path_str.strip_prefix("~/") {
        get_home_dir().join(rest)
    } else if path_str == "~" {
        get_home_dir()
    } else if Path::new(path_str).is_absolute() {
        PathBuf::from(path_str)
    } else {
        base.join(path_str)
    }
}

/// Format a path for display (show ~ for home)
pub fn format_path_for_display(path: &Path) -> String {
    let home_dir = get_home_dir();

    if let Ok(relative) = path.strip_prefix(&home_dir) {
        if relative.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", relative.to_string_lossy())
        }
    } else {
        path.to_string_lossy().to_string()
    }
}

/// Human readable file size
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
