//! OpenAI text-to-speech implementation.

use super::{estimate_duration, Narration, NarrationRequest, NarrationVoice, Synthesizer};
use crate::error::{Result, StoryreelError};
use crate::openai::create_client;
use async_openai::types::{CreateSpeechRequestArgs, SpeechModel, SpeechResponseFormat, Voice};
use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, info, instrument};

/// Synthesizer backed by the OpenAI speech endpoint.
pub struct OpenAISynthesizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAISynthesizer {
    pub fn new(model: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }
}

impl Default for OpenAISynthesizer {
    fn default() -> Self {
        Self::new("tts-1")
    }
}

fn to_openai_voice(voice: NarrationVoice) -> Voice {
    match voice {
        NarrationVoice::Alloy => Voice::Alloy,
        NarrationVoice::Echo => Voice::Echo,
        NarrationVoice::Fable => Voice::Fable,
        NarrationVoice::Onyx => Voice::Onyx,
        NarrationVoice::Nova => Voice::Nova,
        NarrationVoice::Shimmer => Voice::Shimmer,
    }
}

#[async_trait]
impl Synthesizer for OpenAISynthesizer {
    #[instrument(skip(self, request), fields(voice = %request.voice, speed = request.speed))]
    async fn synthesize(&self, request: &NarrationRequest) -> Result<Narration> {
        request.validate()?;
        info!("Generating narration for {} characters", request.text.chars().count());

        let speech_request = CreateSpeechRequestArgs::default()
            .model(self.speech_model())
            .input(request.text.clone())
            .voice(to_openai_voice(request.voice))
            .speed(request.speed)
            .response_format(SpeechResponseFormat::Mp3)
            .build()
            .map_err(|e| StoryreelError::Synthesis(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .speech(speech_request)
            .await
            .map_err(|e| StoryreelError::Synthesis(e.to_string()))?;

        debug!("Received {} bytes of audio", response.bytes.len());

        Ok(Narration {
            audio_base64: base64::engine::general_purpose::STANDARD.encode(&response.bytes),
            format: "mp3".to_string(),
            estimated_duration: estimate_duration(&request.text),
            voice: request.voice,
            speed: request.speed,
        })
    }
}
