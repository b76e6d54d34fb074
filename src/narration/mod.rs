//! Narration audio synthesis.

mod openai;

pub use openai::OpenAISynthesizer;

use crate::error::{Result, StoryreelError};
use crate::script::WORDS_PER_SECOND;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Voices offered for narration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationVoice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl std::str::FromStr for NarrationVoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alloy" => Ok(NarrationVoice::Alloy),
            "echo" => Ok(NarrationVoice::Echo),
            "fable" => Ok(NarrationVoice::Fable),
            "onyx" => Ok(NarrationVoice::Onyx),
            "nova" => Ok(NarrationVoice::Nova),
            "shimmer" => Ok(NarrationVoice::Shimmer),
            _ => Err(format!("Unknown voice: {}", s)),
        }
    }
}

impl std::fmt::Display for NarrationVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NarrationVoice::Alloy => "alloy",
            NarrationVoice::Echo => "echo",
            NarrationVoice::Fable => "fable",
            NarrationVoice::Onyx => "onyx",
            NarrationVoice::Nova => "nova",
            NarrationVoice::Shimmer => "shimmer",
        };
        write!(f, "{}", name)
    }
}

/// Input to a narration synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrationRequest {
    pub text: String,
    #[serde(default)]
    pub voice: NarrationVoice,
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speed() -> f32 {
    1.0
}

impl NarrationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: NarrationVoice::default(),
            speed: default_speed(),
        }
    }

    /// Reject empty text and speeds outside 0.25 - 4.0.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(StoryreelError::InvalidInput(
                "Text is required for narration".to_string(),
            ));
        }
        if !(0.25..=4.0).contains(&self.speed) {
            return Err(StoryreelError::InvalidInput(format!(
                "Speed {} is outside 0.25 - 4.0",
                self.speed
            )));
        }
        Ok(())
    }
}

/// Synthesized narration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narration {
    /// Encoded audio, base64.
    pub audio_base64: String,
    /// Audio container format (e.g. "mp3").
    pub format: String,
    /// Rough spoken length in seconds.
    pub estimated_duration: f64,
    pub voice: NarrationVoice,
    pub speed: f32,
}

/// Estimate spoken length from word count at the default narration pace.
pub fn estimate_duration(text: &str) -> f64 {
    (text.split_whitespace().count() as f64 / WORDS_PER_SECOND).ceil()
}

/// Trait for text-to-speech backends.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, request: &NarrationRequest) -> Result<Narration>;
}
