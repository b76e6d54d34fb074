//! Project persistence.
//!
//! A project bundles the fetched article, the edited script and the video
//! settings under a title so work can be resumed later.

mod memory;
mod sqlite;
mod template;

pub use memory::MemoryProjectStore;
pub use sqlite::SqliteProjectStore;
pub use template::{find_template, templates, VideoTemplate};

use crate::article::Article;
use crate::error::{Result, StoryreelError};
use crate::script::Script;
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Output frame shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "1:1")]
    Square,
}

/// Output resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoQuality {
    #[serde(rename = "720p")]
    Hd,
    #[default]
    #[serde(rename = "1080p")]
    FullHd,
    #[serde(rename = "4k")]
    UltraHd,
}

/// Rendering preferences stored with a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoSettings {
    pub aspect_ratio: AspectRatio,
    pub quality: VideoQuality,
    pub include_music: bool,
    /// Percent, 0 - 100.
    pub music_volume: u8,
    pub include_subtitles: bool,
    /// Seconds, 0 - 2.
    pub transition_duration: f64,
    /// Pixels, 12 - 72.
    pub font_size: u32,
    /// Built-in template id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::default(),
            quality: VideoQuality::default(),
            include_music: false,
            music_volume: 30,
            include_subtitles: true,
            transition_duration: 0.5,
            font_size: 24,
            template: None,
        }
    }
}

impl VideoSettings {
    /// Check slider ranges and the template id.
    pub fn validate(&self) -> Result<()> {
        if self.music_volume > 100 {
            return Err(StoryreelError::InvalidInput(format!(
                "Music volume {} is outside 0 - 100",
                self.music_volume
            )));
        }
        if !(0.0..=2.0).contains(&self.transition_duration) {
            return Err(StoryreelError::InvalidInput(format!(
                "Transition duration {} is outside 0 - 2",
                self.transition_duration
            )));
        }
        if !(12..=72).contains(&self.font_size) {
            return Err(StoryreelError::InvalidInput(format!(
                "Font size {} is outside 12 - 72",
                self.font_size
            )));
        }
        if let Some(id) = &self.template {
            if find_template(id).is_none() {
                return Err(StoryreelError::InvalidInput(format!("Unknown template: {}", id)));
            }
        }
        Ok(())
    }
}

/// A saved project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub article_data: Option<Article>,
    pub script: Option<Script>,
    pub settings: VideoSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating or updating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub article_data: Option<Article>,
    #[serde(default)]
    pub script: Option<Script>,
    #[serde(default)]
    pub settings: VideoSettings,
}

impl NewProject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_article(mut self, article: Article) -> Self {
        self.url = article.url.clone();
        self.article_data = Some(article);
        self
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }

    pub fn with_settings(mut self, settings: VideoSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(StoryreelError::InvalidInput(
                "Please enter a project name".to_string(),
            ));
        }
        self.settings.validate()
    }

    /// Build a stored project with fresh timestamps.
    fn into_project(self, id: Uuid, created_at: DateTime<Utc>) -> Project {
        Project {
            id,
            title: self.title.trim().to_string(),
            url: self.url,
            article_data: self.article_data,
            script: self.script,
            settings: self.settings,
            created_at,
            updated_at: now(),
        }
    }
}

/// Current time at the precision stores keep.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Listing entry for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub scene_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            url: project.url.clone(),
            scene_count: project.script.as_ref().map(|s| s.scenes.len()).unwrap_or(0),
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// Trait for project storage backends.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Save a new project.
    async fn create(&self, project: NewProject) -> Result<Project>;

    /// Most recently updated projects first.
    async fn list(&self, limit: usize) -> Result<Vec<ProjectSummary>>;

    async fn get(&self, id: &Uuid) -> Result<Option<Project>>;

    /// Replace a project's contents, keeping its id and creation time.
    async fn update(&self, id: &Uuid, project: NewProject) -> Result<Project>;

    /// Returns whether a project was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_settings_defaults() {
        let settings: VideoSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, VideoSettings::default());
        assert_eq!(settings.aspect_ratio, AspectRatio::Landscape);
        assert_eq!(settings.music_volume, 30);
        assert!(settings.include_subtitles);
    }

    #[test]
    fn test_video_settings_json_shape() {
        let settings = VideoSettings {
            aspect_ratio: AspectRatio::Portrait,
            quality: VideoQuality::UltraHd,
            template: Some("modern".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["aspectRatio"], "9:16");
        assert_eq!(json["quality"], "4k");
        assert_eq!(json["transitionDuration"], 0.5);
        assert_eq!(json["template"], "modern");
    }

    #[test]
    fn test_video_settings_validation() {
        assert!(VideoSettings::default().validate().is_ok());

        let loud = VideoSettings { music_volume: 150, ..Default::default() };
        assert!(loud.validate().is_err());

        let tiny = VideoSettings { font_size: 8, ..Default::default() };
        assert!(tiny.validate().is_err());

        let unknown = VideoSettings { template: Some("retro".to_string()), ..Default::default() };
        assert!(matches!(unknown.validate(), Err(StoryreelError::InvalidInput(_))));
    }

    #[test]
    fn test_new_project_requires_title() {
        assert!(NewProject::new("Eiffel Tower").validate().is_ok());
        assert!(matches!(
            NewProject::new("   ").validate(),
            Err(StoryreelError::InvalidInput(_))
        ));
    }
}
