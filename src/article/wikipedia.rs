//! Wikipedia article source using the MediaWiki query API.

use super::{build_article, extract_title, Article, ArticleFetcher};
use crate::config::WikipediaSettings;
use crate::error::{Result, StoryreelError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Fetches plain-text extracts and lead images from Wikipedia.
pub struct WikipediaFetcher {
    client: reqwest::Client,
    api_url: String,
    summary_chars: usize,
    section_chars: usize,
}

impl WikipediaFetcher {
    /// Create a fetcher for English Wikipedia with default limits.
    pub fn new() -> Self {
        Self::with_settings(&WikipediaSettings::default())
    }

    /// Create a fetcher from settings.
    pub fn with_settings(settings: &WikipediaSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(concat!("storyreel/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_url: settings.api_url.clone(),
            summary_chars: settings.summary_chars,
            section_chars: settings.section_chars,
        }
    }

    /// Turn a query API response into an article.
    fn parse_response(&self, url: &str, json: &serde_json::Value) -> Result<Article> {
        let pages = json["query"]["pages"].as_object().ok_or_else(|| {
            StoryreelError::ArticleFetch("Unexpected response from Wikipedia API".to_string())
        })?;

        let (page_id, page) = pages
            .iter()
            .next()
            .ok_or_else(|| StoryreelError::ArticleNotFound(url.to_string()))?;

        if page_id == "-1" || page.get("missing").is_some() {
            return Err(StoryreelError::ArticleNotFound(url.to_string()));
        }

        let title = page["title"].as_str().unwrap_or("Untitled");
        let extract = page["extract"].as_str().unwrap_or_default();
        let thumbnail = page["original"]["source"].as_str().map(|s| s.to_string());

        Ok(build_article(
            title,
            url,
            extract,
            thumbnail,
            self.summary_chars,
            self.section_chars,
        ))
    }
}

impl Default for WikipediaFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleFetcher for WikipediaFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Article> {
        let title = extract_title(url)?;
        info!("Fetching Wikipedia article: {}", title);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts|pageimages"),
                ("titles", title.as_str()),
                ("explaintext", "1"),
                ("exsectionformat", "wiki"),
                ("piprop", "original"),
                ("redirects", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoryreelError::ArticleFetch(format!(
                "Wikipedia API returned {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await?;
        let article = self.parse_response(url, &json)?;

        debug!(
            "Parsed '{}' into {} sections ({} chars)",
            article.title,
            article.sections.len(),
            article.full_content.chars().count()
        );

        Ok(article)
    }
}
