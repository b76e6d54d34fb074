//! Storyboard output formatting (JSON, SRT, VTT).
//!
//! Scene start and end times come from timeline positions, so subtitle cues
//! always line up with the edited durations.

use super::Script;
use serde::Serialize;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Json,
    Srt,
    Vtt,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "srt" => Ok(ExportFormat::Srt),
            "vtt" | "webvtt" => Ok(ExportFormat::Vtt),
            _ => Err(format!("Unknown format: {}. Use json, srt, or vtt.", s)),
        }
    }
}

/// JSON-serializable storyboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryboardExport {
    pub title: String,
    pub script: String,
    pub word_count: usize,
    pub total_duration: f64,
    pub scenes: Vec<ExportedScene>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedScene {
    pub number: usize,
    pub text: String,
    pub visual_suggestion: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub duration: f64,
}

impl StoryboardExport {
    pub fn new(title: &str, script: &Script) -> Self {
        let scenes = script
            .scenes
            .layout()
            .into_iter()
            .zip(script.scenes.scenes())
            .map(|(segment, scene)| ExportedScene {
                number: segment.index + 1,
                text: scene.text.clone(),
                visual_suggestion: scene.visual_suggestion.clone(),
                start_seconds: segment.start,
                end_seconds: segment.end,
                duration: scene.duration,
            })
            .collect();

        Self {
            title: title.to_string(),
            script: script.script.clone(),
            word_count: script.word_count,
            total_duration: script.scenes.total_duration(),
            scenes,
        }
    }
}

/// Format a storyboard for output.
pub fn format_storyboard(title: &str, script: &Script, format: ExportFormat) -> String {
    let export = StoryboardExport::new(title, script);
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(&export).unwrap_or_else(|_| "{}".to_string())
        }
        ExportFormat::Srt => format_cues(&export, None, format_srt_timestamp),
        ExportFormat::Vtt => format_cues(&export, Some("WEBVTT\n\n"), format_vtt_timestamp),
    }
}

/// Emit one cue per scene with narration; silent scenes only advance the clock.
fn format_cues(
    export: &StoryboardExport,
    header: Option<&str>,
    timestamp: fn(f64) -> String,
) -> String {
    let mut output = header.unwrap_or_default().to_string();

    let spoken = export.scenes.iter().filter(|s| !s.text.trim().is_empty());
    for (i, scene) in spoken.enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            timestamp(scene.start_seconds),
            timestamp(scene.end_seconds)
        ));
        output.push_str(scene.text.trim());
        output.push_str("\n\n");
    }

    output
}

/// Format timestamp for SRT (00:00:00,000).
fn format_srt_timestamp(seconds: f64) -> String {
    let (hours, minutes, secs, ms) = split_millis(seconds);
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, ms)
}

/// Format timestamp for VTT (00:00:00.000).
fn format_vtt_timestamp(seconds: f64) -> String {
    let (hours, minutes, secs, ms) = split_millis(seconds);
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
}

fn split_millis(seconds: f64) -> (u64, u64, u64, u64) {
    let total_ms = (seconds * 1000.0).round() as u64;
    (
        total_ms / 3_600_000,
        (total_ms % 3_600_000) / 60_000,
        (total_ms % 60_000) / 1000,
        total_ms % 1000,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{Scene, Timeline};

    fn sample_script() -> Script {
        Script::new(
            "Hello world. [pause] This is a test.",
            Timeline::from_scenes(vec![
                Scene::new("Hello world.", 2.5, "Title card"),
                Scene::new("", 1.0, "Black frame"),
                Scene::new("This is a test.", 2.5, "Lab footage"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_format_json() {
        let json = format_storyboard("Testing", &sample_script(), ExportFormat::Json);
        assert!(json.contains("\"title\": \"Testing\""));
        assert!(json.contains("\"visualSuggestion\": \"Lab footage\""));
        assert!(json.contains("\"totalDuration\": 6.0"));
    }

    #[test]
    fn test_format_srt_skips_silent_scenes() {
        let srt = format_storyboard("Testing", &sample_script(), ExportFormat::Srt);
        assert!(srt.contains("1\n00:00:00,000 --> 00:00:02,500\nHello world."));
        assert!(srt.contains("2\n00:00:03,500 --> 00:00:06,000\nThis is a test."));
        assert!(!srt.contains("3\n"));
    }

    #[test]
    fn test_format_vtt() {
        let vtt = format_storyboard("Testing", &sample_script(), ExportFormat::Vtt);
        assert!(vtt.starts_with("WEBVTT"));
        assert!(vtt.contains("00:00:00.000 --> 00:00:02.500"));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("SRT".parse::<ExportFormat>().unwrap(), ExportFormat::Srt);
        assert_eq!("webvtt".parse::<ExportFormat>().unwrap(), ExportFormat::Vtt);
        assert!("mp4".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_srt_timestamp() {
        assert_eq!(format_srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(61.5), "00:01:01,500");
        assert_eq!(format_srt_timestamp(3661.123), "01:01:01,123");
    }
}
