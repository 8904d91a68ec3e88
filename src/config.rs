use crate::keymap::Keymap;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// UI theme: "dark", "light" or "nocolor"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// File extensions the upload screen accepts (without the dot)
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Directory where clip lists are written
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Pause between processing steps so progress stays readable
    #[serde(default = "default_step_delay_ms")]
    pub processing_step_delay_ms: u64,
    /// Keyboard shortcuts
    #[serde(default)]
    pub keymap: Keymap,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_allowed_extensions() -> Vec<String> {
    ["mp4", "mov", "mkv", "webm", "m4a", "mp3", "wav"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_export_dir() -> PathBuf {
    crate::utils::get_home_dir().join("podclip-clips")
}

fn default_step_delay_ms() -> u64 {
    150
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            allowed_extensions: default_allowed_extensions(),
            export_dir: default_export_dir(),
            processing_step_delay_ms: default_step_delay_ms(),
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, writing the defaults if it doesn't exist
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            // An explicitly empty list would make every upload fail
            if config.allowed_extensions.is_empty() {
                config.allowed_extensions = default_allowed_extensions();
            }
            debug!("Loaded config from {:?}", config_path);
            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            info!("Created default config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Check whether a path has one of the accepted extensions (case-insensitive)
    pub fn is_allowed_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::KeymapPreset;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert!(config.allowed_extensions.contains(&"mp4".to_string()));
        assert_eq!(config.processing_step_delay_ms, 150);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.export_dir = temp_dir.path().join("clips");
        config.keymap.preset = KeymapPreset::Vim;
        config.save(&config_path).unwrap();

        let loaded = Config::load_or_create(&config_path).unwrap();
        assert_eq!(loaded.export_dir, config.export_dir);
        assert_eq!(loaded.keymap.preset, KeymapPreset::Vim);
    }

    #[test]
    fn test_missing_config_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_or_create(&config_path).unwrap();
        assert!(config_path.exists());
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "theme = \"light\"\nallowed_extensions = []\n").unwrap();

        let config = Config::load_or_create(&config_path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.allowed_extensions, default_allowed_extensions());
        assert_eq!(config.keymap.preset, KeymapPreset::Standard);
    }

    #[test]
    fn test_is_allowed_extension() {
        let config = Config::default();
        assert!(config.is_allowed_extension(Path::new("/tmp/show.MP4")));
        assert!(config.is_allowed_extension(Path::new("episode.webm")));
        assert!(!config.is_allowed_extension(Path::new("notes.txt")));
        assert!(!config.is_allowed_extension(Path::new("no_extension")));
    }
}
