//! Error types for Storyreel.

use crate::timeline::TimelineError;
use thiserror::Error;

/// Library-level error type for Storyreel operations.
#[derive(Error, Debug)]
pub enum StoryreelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid Wikipedia URL: {0}")]
    InvalidUrl(String),

    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Article fetch failed: {0}")]
    ArticleFetch(String),

    #[error("Script generation failed: {0}")]
    ScriptGeneration(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("AI credits depleted. Please add credits to continue.")]
    QuotaExhausted,

    #[error("Narration synthesis failed: {0}")]
    Synthesis(String),

    #[error("Project store error: {0}")]
    ProjectStore(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Storyreel operations.
pub type Result<T> = std::result::Result<T, StoryreelError>;
