//! Configuration system for caffeeteria
//!
//! Loads settings from ~/.config/caffeeteria/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main settings structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub editor: EditorSettings,
    pub tree: TreeSettings,
    pub log: LogSettings,
}

/// Editor behavior settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Report command outcomes and failures on the footer line (default: true)
    /// When false, failed commands leave no trace at all.
    pub status_messages: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            status_messages: true,
        }
    }
}

/// Settings for the `file_txt` project tree listing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    /// First line of the generated listing
    pub header: String,
    /// Glyph shown before directory names
    pub dir_icon: String,
    /// Glyph shown before file names
    pub file_icon: String,
    /// Descend into symlinked directories (default: false)
    pub follow_links: bool,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            header: "--- Project Tree ---".to_string(),
            dir_icon: "📁".to_string(),
            file_icon: "📄".to_string(),
            follow_links: false,
        }
    }
}

/// Log file settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Write a log file at all (default: true)
    pub enabled: bool,
    /// Filter directive, e.g. "info" or "caffeeteria=debug" (default: "info")
    /// The CAFFEETERIA_LOG environment variable takes precedence.
    pub level: String,
    /// Log file path (default: <cache dir>/caffeeteria/caffeeteria.log)
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/caffeeteria/config.toml"))
}

/// Template config file with comments explaining all options
/// This is generated when no config file exists
fn default_config_template() -> &'static str {
    r#"# Caffeeteria Configuration
# Only add settings you want to change from the defaults.
# Key bindings are fixed: Ctrl+X quit, Ctrl+S save, Ctrl+O open, Ctrl+P or ':' command.

# [editor]
# status_messages = true      # Show command results and errors on the bottom line

# [tree]
# header = "--- Project Tree ---"
# dir_icon = "📁"
# file_icon = "📄"
# follow_links = false

# [log]
# enabled = true
# level = "info"              # Overridden by the CAFFEETERIA_LOG environment variable
# file = "/tmp/caffeeteria.log"
"#
}

/// Ensure config directory and template file exist
fn ensure_config_exists(path: &Path) {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    if !path.exists() {
        let _ = std::fs::write(path, default_config_template());
    }
}

/// Parse settings from a specific file
pub fn load_config_from(path: &Path) -> anyhow::Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    let settings = toml::from_str::<Settings>(&content)?;
    Ok(settings)
}

/// Load settings from the config file
///
/// Returns default settings if the file doesn't exist or can't be parsed.
/// The second value carries a warning to show once the UI is up.
pub fn load_config() -> (Settings, Option<String>) {
    let Some(path) = config_path() else {
        return (Settings::default(), None);
    };

    ensure_config_exists(&path);

    if !path.exists() {
        return (Settings::default(), None);
    }

    match load_config_from(&path) {
        Ok(settings) => (settings, None),
        Err(e) => (
            Settings::default(),
            Some(format!("Config error in {}: {}", path.display(), e)),
        ),
    }
}
