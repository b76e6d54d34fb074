//! Fetch command implementation.

use crate::article::{ArticleFetcher, WikipediaFetcher};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the fetch command.
pub async fn run_fetch(url: &str, json: bool, settings: Settings) -> Result<()> {
    preflight::check(Operation::Fetch)?;

    let fetcher = WikipediaFetcher::with_settings(&settings.wikipedia);

    let spinner = Output::spinner("Fetching article...");
    let result = fetcher.fetch(url).await;
    spinner.finish_and_clear();

    let article = match result {
        Ok(article) => article,
        Err(e) => {
            Output::error(&format!("Failed to fetch article: {}", e));
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&article)?);
        return Ok(());
    }

    Output::header(&article.title);
    Output::kv("URL", &article.url);
    if let Some(thumbnail) = &article.thumbnail {
        Output::kv("Image", thumbnail);
    }
    Output::kv("Length", &format!("{} characters", article.full_content.chars().count()));
    println!();
    println!("{}", article.summary);

    Output::header(&format!("Sections ({})", article.sections.len()));
    for section in &article.sections {
        Output::list_item(&format!(
            "{} ({} chars)",
            section.title,
            section.content.chars().count()
        ));
    }

    Ok(())
}
