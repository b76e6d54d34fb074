//! Narration scripts and their generation.
//!
//! A [`Script`] owns the scene [`Timeline`] together with the cached
//! `estimated_duration` shown next to it. The timeline never updates that cache
//! itself; [`Script::apply_edit`] refreshes it after every successful edit.

mod export;
mod openai;

pub use export::{format_storyboard, ExportFormat, ExportedScene, StoryboardExport};
pub use openai::{parse_script_reply, OpenAIScriptGenerator};

use crate::error::Result;
use crate::timeline::{SceneEdit, Timeline, TimelineResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Narration style requested from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStyle {
    #[default]
    Informative,
    Engaging,
    Documentary,
    Casual,
}

impl ScriptStyle {
    pub const ALL: [ScriptStyle; 4] = [
        ScriptStyle::Informative,
        ScriptStyle::Engaging,
        ScriptStyle::Documentary,
        ScriptStyle::Casual,
    ];

    /// Prompt instruction describing this style.
    pub fn instruction(&self) -> &'static str {
        match self {
            ScriptStyle::Informative => {
                "Create an informative, educational narration suitable for learning."
            }
            ScriptStyle::Engaging => {
                "Create an engaging, dynamic narration that captures attention."
            }
            ScriptStyle::Documentary => {
                "Create a documentary-style narration with dramatic pauses and emphasis."
            }
            ScriptStyle::Casual => {
                "Create a casual, conversational narration as if explaining to a friend."
            }
        }
    }
}

impl std::str::FromStr for ScriptStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "informative" => Ok(ScriptStyle::Informative),
            "engaging" => Ok(ScriptStyle::Engaging),
            "documentary" => Ok(ScriptStyle::Documentary),
            "casual" => Ok(ScriptStyle::Casual),
            _ => Err(format!(
                "Unknown script style: {}. Use informative, engaging, documentary, or casual.",
                s
            )),
        }
    }
}

impl std::fmt::Display for ScriptStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptStyle::Informative => write!(f, "informative"),
            ScriptStyle::Engaging => write!(f, "engaging"),
            ScriptStyle::Documentary => write!(f, "documentary"),
            ScriptStyle::Casual => write!(f, "casual"),
        }
    }
}

/// Average narration pace used for word targets and duration estimates.
pub const WORDS_PER_SECOND: f64 = 2.5;

/// Input to a script generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptRequest {
    /// Article text to narrate.
    pub content: String,
    /// Article title.
    #[serde(default)]
    pub title: String,
    /// Target video length in seconds.
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub style: ScriptStyle,
}

fn default_duration() -> u32 {
    60
}

impl ScriptRequest {
    pub fn new(content: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: title.into(),
            duration: default_duration(),
            style: ScriptStyle::default(),
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_style(mut self, style: ScriptStyle) -> Self {
        self.style = style;
        self
    }

    /// Number of words that fit the target duration.
    pub fn word_target(&self) -> u32 {
        (f64::from(self.duration) / WORDS_PER_SECOND).floor() as u32
    }
}

/// A generated narration script with its scene timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Complete narration text.
    pub script: String,
    #[serde(default)]
    pub word_count: usize,
    /// Cached total of the scene durations, in seconds.
    #[serde(default)]
    pub estimated_duration: f64,
    #[serde(default)]
    pub scenes: Timeline,
}

impl Script {
    pub fn new(script: impl Into<String>, scenes: Timeline) -> Self {
        let script = script.into();
        let word_count = script.split_whitespace().count();
        let estimated_duration = scenes.total_duration();
        Self {
            script,
            word_count,
            estimated_duration,
            scenes,
        }
    }

    /// Apply a scene edit and refresh `estimated_duration`.
    ///
    /// On error the script is left unchanged.
    pub fn apply_edit(&mut self, edit: &SceneEdit) -> TimelineResult<()> {
        let scenes = edit.apply(&self.scenes)?;
        self.replace_scenes(scenes);
        Ok(())
    }

    /// Replace the whole timeline and refresh `estimated_duration`.
    pub fn replace_scenes(&mut self, scenes: Timeline) {
        self.scenes = scenes;
        self.refresh_estimated_duration();
    }

    pub fn refresh_estimated_duration(&mut self) {
        self.estimated_duration = self.scenes.total_duration();
    }

    /// Fill in aggregates a model reply left out.
    pub fn fill_missing(&mut self) {
        if self.word_count == 0 {
            self.word_count = self.script.split_whitespace().count();
        }
        if self.estimated_duration <= 0.0 {
            self.refresh_estimated_duration();
        }
    }
}

/// Trait for script generators.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// Write a narration script for the requested article text.
    async fn generate(&self, request: &ScriptRequest) -> Result<Script>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{Scene, TimelineError};

    fn sample_script() -> Script {
        Script::new(
            "Rust is a language. It is fast.",
            Timeline::from_scenes(vec![
                Scene::new("Rust is a language.", 10.0, "Logo"),
                Scene::new("It is fast.", 20.0, "Speedometer"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_apply_edit_refreshes_estimated_duration() {
        let mut script = sample_script();
        assert_eq!(script.estimated_duration, 30.0);

        script
            .apply_edit(&SceneEdit::SetDuration {
                index: 1,
                duration: 5.0,
            })
            .unwrap();
        assert_eq!(script.estimated_duration, 15.0);

        script.apply_edit(&SceneEdit::Delete { index: 0 }).unwrap();
        assert_eq!(script.estimated_duration, 5.0);
    }

    #[test]
    fn test_failed_edit_leaves_script_unchanged() {
        let mut script = sample_script();
        let before = script.clone();

        let err = script
            .apply_edit(&SceneEdit::SetDuration {
                index: 0,
                duration: -1.0,
            })
            .unwrap_err();
        assert_eq!(err, TimelineError::InvalidDuration(-1.0));
        assert_eq!(script, before);
    }

    #[test]
    fn test_word_target() {
        assert_eq!(ScriptRequest::new("x", "t").word_target(), 24);
        assert_eq!(ScriptRequest::new("x", "t").with_duration(90).word_target(), 36);
    }

    #[test]
    fn test_request_defaults_from_json() {
        let request: ScriptRequest = serde_json::from_str(r#"{"content": "text"}"#).unwrap();
        assert_eq!(request.duration, 60);
        assert_eq!(request.style, ScriptStyle::Informative);
    }

    #[test]
    fn test_parse_style() {
        assert_eq!("Documentary".parse::<ScriptStyle>().unwrap(), ScriptStyle::Documentary);
        assert!("noir".parse::<ScriptStyle>().is_err());
        for style in ScriptStyle::ALL {
            assert_eq!(style.to_string().parse::<ScriptStyle>().unwrap(), style);
        }
    }

    #[test]
    fn test_fill_missing() {
        let mut script: Script = serde_json::from_str(
            r#"{"script": "one two three", "scenes": [{"text": "one two three", "duration": 7.5}]}"#,
        )
        .unwrap();
        script.fill_missing();
        assert_eq!(script.word_count, 3);
        assert_eq!(script.estimated_duration, 7.5);
    }
}
