//! Configuration management
//!
//! Loads and validates the optional TOML configuration file at
//! `$XDG_CONFIG_HOME/wpsw/config.toml`. A missing file means defaults.

use color_eyre::eyre::{self, Context, ContextCompat, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::wpctl::{DEFAULT_WPCTL_COMMAND, Wpctl};

// ============================================================================
// Public Configuration Types
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: Settings,
}

/// Global settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Program and leading arguments used to reach `wpctl`
    pub wpctl_command: Vec<String>,
    /// Desktop notification after `set`
    pub notify_switch: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wpctl_command: default_wpctl_command(),
            notify_switch: true,
            log_level: default_log_level(),
        }
    }
}

// ============================================================================
// Config File Deserialization (TOML)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: SettingsFile,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(default = "default_wpctl_command")]
    wpctl_command: Vec<String>,
    #[serde(default = "default_true")]
    notify_switch: bool,
    #[serde(default = "default_log_level")]
    log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_wpctl_command() -> Vec<String> {
    vec![DEFAULT_WPCTL_COMMAND.to_string()]
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            wpctl_command: default_wpctl_command(),
            notify_switch: true,
            log_level: default_log_level(),
        }
    }
}

// ============================================================================
// Config Implementation
// ============================================================================

impl Config {
    /// Load configuration from the default XDG config path
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            info!("No config at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {path:?}"))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config: {path:?}"))
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or a setting is invalid.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config_file: ConfigFile =
            toml::from_str(contents).context("Failed to parse config TOML")?;

        let config = Config {
            settings: Settings {
                wpctl_command: config_file.settings.wpctl_command,
                notify_switch: config_file.settings.notify_switch,
                log_level: config_file.settings.log_level,
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        match self.settings.log_level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            level => eyre::bail!(
                "Invalid log_level '{level}'. Must be: error, warn, info, debug, or trace"
            ),
        }

        match self.settings.wpctl_command.first() {
            None => eyre::bail!("wpctl_command is empty. Use [\"wpctl\"] for the default."),
            Some(program) if program.trim().is_empty() => {
                eyre::bail!("wpctl_command has an empty program name")
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Get the XDG config path for wpsw
    ///
    /// # Errors
    /// Returns an error if no config directory can be determined.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("wpsw");
        Ok(config_dir.join("config.toml"))
    }

    /// The `wpctl` runner described by this config
    #[must_use]
    pub fn wpctl(&self) -> Wpctl {
        Wpctl::from_command(&self.settings.wpctl_command)
    }

    /// Print a human-readable summary of the configuration
    pub fn print_summary(&self) {
        println!("✓ Configuration valid\n");

        println!("Settings:");
        println!("  wpctl_command: {}", self.wpctl().display_command(&[]));
        println!("  notify_switch: {}", self.settings.notify_switch);
        println!("  log_level: {}", self.settings.log_level);

        if let Ok(path) = Self::get_config_path() {
            let note = if path.exists() { "" } else { " (not present, defaults used)" };
            println!("\nConfig: {path:?}{note}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.settings.wpctl_command, vec!["wpctl".to_string()]);
        assert!(config.settings.notify_switch);
        assert_eq!(config.settings.log_level, "warn");
    }

    #[test]
    fn test_wrapped_wpctl_command() {
        let config = Config::from_toml(
            r#"
[settings]
wpctl_command = ["flatpak-spawn", "--host", "wpctl"]
notify_switch = false
log_level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(
            config.wpctl().display_command(&["status"]),
            "flatpak-spawn --host wpctl status"
        );
        assert!(!config.settings.notify_switch);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let err = Config::from_toml("[settings]\nlog_level = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("Invalid log_level"));
    }

    #[test]
    fn test_empty_wpctl_command_rejected() {
        assert!(Config::from_toml("[settings]\nwpctl_command = []\n").is_err());
        assert!(Config::from_toml("[settings]\nwpctl_command = [\" \"]\n").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("[settings]\nsmart_toggle = true\n").is_err());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\nlog_level = \"info\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.settings.log_level, "info");
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_config_path_is_under_wpsw_dir() {
        // CI and dev machines always have HOME or XDG_CONFIG_HOME set
        let path = Config::get_config_path().unwrap();
        assert!(path.ends_with("wpsw/config.toml"), "{path:?}");
    }
}
