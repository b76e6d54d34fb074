//! Generate command implementation.

use crate::cli::output::format_duration;
use crate::cli::preflight::{self, Operation};
use crate::cli::{write_document, Output};
use crate::config::Settings;
use crate::error::StoryreelError;
use crate::orchestrator::Orchestrator;
use crate::script::ScriptStyle;
use anyhow::Result;

/// Run the generate command.
pub async fn run_generate(
    url: &str,
    duration: Option<u32>,
    style: Option<&str>,
    output: Option<String>,
    title: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Generate) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let style = style
        .map(|s| s.parse::<ScriptStyle>())
        .transpose()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Fetching article and writing script...");
    let result = orchestrator.create_storyboard(url, duration, style).await;
    spinner.finish_and_clear();

    let session = match result {
        Ok(session) => session,
        Err(e) => {
            Output::error(&format!("Failed to generate storyboard: {}", e));
            match e {
                StoryreelError::RateLimited | StoryreelError::QuotaExhausted => {
                    Output::info("Nothing was saved; retry once the limit clears.");
                }
                StoryreelError::InvalidUrl(_) => {
                    Output::info("Use a link like https://en.wikipedia.org/wiki/Eiffel_Tower");
                }
                _ => {}
            }
            return Err(e.into());
        }
    };

    let title = title
        .or_else(|| session.article().map(|a| a.title.clone()))
        .unwrap_or_else(|| "Untitled".to_string());
    let document = session.to_document(&title);

    match output.as_deref() {
        Some(path) if path != "-" => {
            write_document(&document, Some(path))?;
            if let Some(script) = session.script() {
                Output::success(&format!(
                    "Wrote '{}' to {} ({} scenes, {} words, {})",
                    title,
                    path,
                    script.scenes.len(),
                    script.word_count,
                    format_duration(script.estimated_duration)
                ));
            }
        }
        _ => write_document(&document, None)?,
    }

    Ok(())
}
