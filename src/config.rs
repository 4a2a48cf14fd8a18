// src/config.rs

//! Defines the configuration structures for `core-canvas`.
//!
//! Configuration is deserialized from a JSON file. Every section carries
//! `#[serde(default)]`, so a file only needs the fields it overrides.

use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a JSON config file to load at first use.
pub const CONFIG_PATH_ENV: &str = "CORE_CANVAS_CONFIG";

/// Process-wide configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

/// Represents the complete configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Font lookup and rendering settings.
    pub fonts: FontConfig,
    /// Defaults for the display window.
    pub window: WindowConfig,
}

/// Font configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Directories searched for a font file when the requested name is not a
    /// readable path on its own.
    pub search_dirs: Vec<PathBuf>,
    /// Smallest point size a vector font is loaded at; smaller requests are
    /// raised to this. Values below 16 have no effect.
    pub min_size: u32,
    /// Whether newly requested fonts render antialiased by default.
    pub antialias: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            search_dirs: vec![
                PathBuf::from("."),
                PathBuf::from("/usr/share/fonts/truetype"),
                PathBuf::from("/usr/share/fonts/TTF"),
                PathBuf::from("/usr/local/share/fonts"),
                PathBuf::from("/Library/Fonts"),
            ],
            min_size: 16,
            antialias: true,
        }
    }
}

/// Window defaults, used by the demo and by callers that do not specify
/// their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "core-canvas".to_string(),
            width: 640,
            height: 480,
            fullscreen: false,
        }
    }
}

impl Config {
    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads the file named by `CORE_CANVAS_CONFIG`, falling back to defaults
    /// when the variable is unset or the file is unusable.
    pub fn load_or_default() -> Self {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Config::load(Path::new(&path)).unwrap_or_else(|e| {
                warn!("{:#}; using default configuration", e);
                Config::default()
            }),
            None => Config::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_log::test;

    #[test]
    fn partial_file_keeps_defaults() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{ "fonts": {{ "min_size": 20 }}, "window": {{ "title": "demo" }} }}"#)?;
        let config = Config::load(file.path())?;
        assert_eq!(config.fonts.min_size, 20);
        assert!(config.fonts.antialias);
        assert_eq!(config.window.title, "demo");
        assert_eq!(config.window.width, 640);
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "not json")?;
        assert!(Config::load(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn defaults_clamp_fonts_at_sixteen() {
        assert_eq!(Config::default().fonts.min_size, 16);
    }
}
