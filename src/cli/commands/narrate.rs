//! Narrate command implementation.

use crate::cli::output::format_duration;
use crate::cli::preflight::{self, Operation};
use crate::cli::{read_document, Output};
use crate::config::Settings;
use crate::narration::NarrationVoice;
use crate::orchestrator::Orchestrator;
use anyhow::{Context, Result};
use base64::Engine;
use std::path::Path;

/// Run the narrate command.
pub async fn run_narrate(
    file: &str,
    voice: Option<&str>,
    speed: Option<f32>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Narrate) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let voice = voice
        .map(|v| v.parse::<NarrationVoice>())
        .transpose()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let document = read_document(file)?;
    let script = document
        .script
        .ok_or_else(|| anyhow::anyhow!("'{}' has no script to narrate", document.title))?;

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Synthesizing narration...");
    let result = orchestrator.narrate(&script, voice, speed).await;
    spinner.finish_and_clear();

    let narration = match result {
        Ok(narration) => narration,
        Err(e) => {
            Output::error(&format!("Failed to synthesize narration: {}", e));
            return Err(e.into());
        }
    };

    let audio = base64::engine::general_purpose::STANDARD
        .decode(&narration.audio_base64)
        .context("Narration audio was not valid base64")?;

    let output_path = output.unwrap_or_else(|| {
        Path::new(file)
            .with_extension(&narration.format)
            .to_string_lossy()
            .to_string()
    });
    std::fs::write(&output_path, &audio)?;

    Output::success(&format!(
        "Wrote narration to {} ({} voice, ~{}, {} KB)",
        output_path,
        narration.voice,
        format_duration(narration.estimated_duration),
        audio.len() / 1024
    ));

    Ok(())
}
