//! Article fetching for Storyreel.
//!
//! Provides a trait-based interface for article sources and the plain-text
//! parsing shared by implementations.

mod wikipedia;

pub use wikipedia::WikipediaFetcher;

use crate::error::{Result, StoryreelError};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A titled block of article text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// A fetched article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    /// Source URL the article was fetched from.
    #[serde(default)]
    pub url: String,
    /// Lead image URL (if available).
    pub thumbnail: Option<String>,
    /// Opening text, truncated.
    pub summary: String,
    pub sections: Vec<Section>,
    /// Complete plain-text extract.
    pub full_content: String,
}

/// Trait for article sources.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetch and parse the article behind `url`.
    async fn fetch(&self, url: &str) -> Result<Article>;
}

fn wiki_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?xi)
            ^(?:https?://)?
            (?:[a-z0-9-]+\.)*wikipedia\.org
            /wiki/
            ([^?\#]+)
        ",
        )
        .expect("valid regex")
    })
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^==+\s*(.+?)\s*==+$").expect("valid regex"))
}

/// Extract the decoded article title from a Wikipedia URL.
pub fn extract_title(url: &str) -> Result<String> {
    let raw = wiki_url_regex()
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| StoryreelError::InvalidUrl(url.to_string()))?;

    // form_urlencoded treats '+', '&' and '=' specially; keep them literal.
    let escaped = raw
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('=', "%3D");
    let title = url::form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default();

    if title.trim().is_empty() {
        return Err(StoryreelError::InvalidUrl(url.to_string()));
    }
    Ok(title)
}

/// Split a plain-text extract into sections at `== Heading ==` lines.
///
/// Text before the first heading becomes "Introduction". Sections without
/// content are dropped.
pub fn split_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        title: "Introduction".to_string(),
        content: String::new(),
    };

    for line in content.split('\n') {
        if let Some(caps) = heading_regex().captures(line) {
            let next = Section {
                title: caps[1].to_string(),
                content: String::new(),
            };
            let finished = std::mem::replace(&mut current, next);
            if !finished.content.trim().is_empty() {
                sections.push(finished);
            }
        } else {
            current.content.push_str(line);
            current.content.push('\n');
        }
    }

    if !current.content.trim().is_empty() {
        sections.push(current);
    }

    sections
}

/// Assemble an [`Article`] from an extract, truncating summary and sections.
pub fn build_article(
    title: &str,
    url: &str,
    extract: &str,
    thumbnail: Option<String>,
    summary_chars: usize,
    section_chars: usize,
) -> Article {
    let sections = split_sections(extract)
        .into_iter()
        .map(|s| Section {
            title: s.title,
            content: truncate_chars(&s.content, section_chars),
        })
        .collect();

    Article {
        title: title.to_string(),
        url: url.to_string(),
        thumbnail,
        summary: format!("{}...", truncate_chars(extract, summary_chars)),
        sections,
        full_content: extract.to_string(),
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title("https://en.wikipedia.org/wiki/Eiffel_Tower").unwrap(),
            "Eiffel_Tower"
        );
        assert_eq!(
            extract_title("https://en.m.wikipedia.org/wiki/C%2B%2B#History").unwrap(),
            "C++"
        );
        assert_eq!(
            extract_title("en.wikipedia.org/wiki/AT&T?oldid=1").unwrap(),
            "AT&T"
        );
        assert_eq!(
            extract_title("https://de.wikipedia.org/wiki/K%C3%B6ln").unwrap(),
            "Köln"
        );
    }

    #[test]
    fn test_extract_title_rejects_other_urls() {
        assert!(matches!(
            extract_title("https://example.com/wiki/Page"),
            Err(StoryreelError::InvalidUrl(_))
        ));
        assert!(matches!(
            extract_title("https://en.wikipedia.org/w/index.php?title=X"),
            Err(StoryreelError::InvalidUrl(_))
        ));
        assert!(extract_title("not a url").is_err());
    }

    #[test]
    fn test_split_sections() {
        let extract = "Lead paragraph.\n\n== History ==\nBuilt in 1889.\n\n=== Design ===\nIron lattice.\n== See also ==\n\n== Notes ==\nNote one.";
        let sections = split_sections(extract);

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Introduction", "History", "Design", "Notes"]);
        assert_eq!(sections[0].content, "Lead paragraph.\n\n");
        assert!(sections[1].content.contains("1889"));
    }

    #[test]
    fn test_build_article_truncates() {
        let extract = format!("{}\n== Body ==\n{}", "a".repeat(600), "b".repeat(1500));
        let article = build_article("Letters", "https://en.wikipedia.org/wiki/Letters", &extract, None, 500, 1000);

        assert_eq!(article.summary.chars().count(), 503);
        assert!(article.summary.ends_with("..."));
        assert_eq!(article.sections[1].content.chars().count(), 1000);
        assert_eq!(article.full_content, extract);
    }

    #[test]
    fn test_article_json_shape() {
        let article = build_article("T", "u", "text", Some("https://img".to_string()), 500, 1000);
        let json = serde_json::to_value(&article).unwrap();
        assert!(json.get("fullContent").is_some());
        assert_eq!(json["thumbnail"], "https://img");
    }
}
