//! Configuration settings for Storyreel.

use crate::narration::NarrationVoice;
use crate::script::ScriptStyle;
use crate::timeline::SceneBounds;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub wikipedia: WikipediaSettings,
    pub script: ScriptSettings,
    pub narration: NarrationSettings,
    pub store: StoreSettings,
    pub editor: SceneBounds,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.storyreel".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Wikipedia article fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikipediaSettings {
    /// MediaWiki API endpoint.
    pub api_url: String,
    /// Characters of article text kept in the summary.
    pub summary_chars: usize,
    /// Characters kept per section.
    pub section_chars: usize,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for WikipediaSettings {
    fn default() -> Self {
        Self {
            api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            summary_chars: 500,
            section_chars: 1000,
            timeout_seconds: 30,
        }
    }
}

/// Narration script generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    /// Chat model used to write scripts.
    pub model: String,
    /// Target video length in seconds when none is requested.
    pub default_duration_seconds: u32,
    /// Narration style when none is requested.
    pub default_style: ScriptStyle,
    /// Article characters sent to the model.
    pub max_content_chars: usize,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            default_duration_seconds: 60,
            default_style: ScriptStyle::Informative,
            max_content_chars: 5000,
        }
    }
}

/// Text-to-speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationSettings {
    /// Speech model.
    pub model: String,
    /// Default voice.
    pub voice: NarrationVoice,
    /// Default playback speed (0.25 - 4.0).
    pub speed: f32,
}

impl Default for NarrationSettings {
    fn default() -> Self {
        Self {
            model: "tts-1".to_string(),
            voice: NarrationVoice::Alloy,
            speed: 1.0,
        }
    }
}

/// Project store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the SQLite database.
    pub sqlite_path: String,
    /// Number of projects returned by a listing.
    pub page_size: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            sqlite_path: "~/.storyreel/projects.db".to_string(),
            page_size: 10,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Reject values that would make the editor misbehave.
    pub fn validate(&self) -> crate::error::Result<()> {
        self.editor
            .validate()
            .map_err(crate::error::StoryreelError::Config)
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::StoryreelError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("storyreel")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded SQLite database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.store.sqlite_path)
    }
}
