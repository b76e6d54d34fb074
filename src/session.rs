//! Editor session state.
//!
//! Holds the article, script and video settings being edited, plus the selected
//! scene. Fetch and generate calls are sequenced with request tokens: only the
//! response to the most recently issued token is applied, so a slow reply can
//! never overwrite the result of a newer request.

use crate::article::Article;
use crate::error::{Result, StoryreelError};
use crate::project::{NewProject, Project, VideoSettings};
use crate::script::Script;
use crate::timeline::{SceneEdit, Selection};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};
use uuid::Uuid;

/// Identifies one in-flight collaborator request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Outcome of completing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response was the latest and is now the session state.
    Applied,
    /// A newer request was issued; the response was discarded.
    Stale,
}

/// State of one editing session.
#[derive(Debug, Default)]
pub struct EditorSession {
    article: Option<Article>,
    script: Option<Script>,
    settings: VideoSettings,
    selection: Selection,
    project_id: Option<Uuid>,
    latest: AtomicU64,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a saved storyboard document.
    pub fn from_document(document: NewProject) -> Self {
        Self {
            article: document.article_data,
            script: document.script,
            settings: document.settings,
            ..Default::default()
        }
    }

    pub fn article(&self) -> Option<&Article> {
        self.article.as_ref()
    }

    pub fn script(&self) -> Option<&Script> {
        self.script.as_ref()
    }

    pub fn settings(&self) -> &VideoSettings {
        &self.settings
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Id of the stored project this session was loaded from, if any.
    pub fn project_id(&self) -> Option<Uuid> {
        self.project_id
    }

    pub fn set_settings(&mut self, settings: VideoSettings) {
        self.settings = settings;
    }

    /// Issue a token for a new request. Any earlier token becomes stale.
    pub fn begin_request(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Apply a fetched article. A new article clears the script.
    ///
    /// Stale responses are discarded whether they succeeded or not. A failed
    /// current response is returned as an error and leaves the state as it was.
    pub fn complete_article(
        &mut self,
        token: RequestToken,
        response: Result<Article>,
    ) -> Result<Applied> {
        if !self.is_current(token) {
            warn!("Discarding stale article response {:?}", token);
            return Ok(Applied::Stale);
        }

        let article = response?;
        debug!("Loaded article '{}'", article.title);
        self.article = Some(article);
        self.script = None;
        self.selection = Selection::default();
        Ok(Applied::Applied)
    }

    /// Apply a generated script, with the same staleness rules as articles.
    pub fn complete_script(
        &mut self,
        token: RequestToken,
        response: Result<Script>,
    ) -> Result<Applied> {
        if !self.is_current(token) {
            warn!("Discarding stale script response {:?}", token);
            return Ok(Applied::Stale);
        }

        let script = response?;
        debug!("Loaded script with {} scenes", script.scenes.len());
        self.script = Some(script);
        self.selection = Selection::default();
        Ok(Applied::Applied)
    }

    /// Apply a scene edit to the current script and re-clamp the selection.
    pub fn apply_edit(&mut self, edit: &SceneEdit) -> Result<()> {
        let script = self
            .script
            .as_mut()
            .ok_or_else(|| StoryreelError::InvalidInput("No script to edit".to_string()))?;

        script.apply_edit(edit)?;
        self.selection = self.selection.clamp(script.scenes.len());
        debug!("{}", edit.describe());
        Ok(())
    }

    /// Select a scene by signed index.
    pub fn select(&mut self, index: i64) -> Result<Selection> {
        let script = self
            .script
            .as_ref()
            .ok_or_else(|| StoryreelError::InvalidInput("No script loaded".to_string()))?;

        let index = script.scenes.checked_index(index)?;
        self.selection = Selection::new(index);
        Ok(self.selection)
    }

    /// Replace the whole session with a stored project.
    pub fn load_project(&mut self, project: Project) {
        self.project_id = Some(project.id);
        self.article = project.article_data;
        self.script = project.script;
        self.settings = project.settings;
        self.selection = Selection::default();
        // Responses to requests issued before the load must not land on it.
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Snapshot the session as a storyboard document.
    pub fn to_document(&self, title: impl Into<String>) -> NewProject {
        let mut document = NewProject::new(title).with_settings(self.settings.clone());
        if let Some(article) = &self.article {
            document = document.with_article(article.clone());
        }
        if let Some(script) = &self.script {
            document = document.with_script(script.clone());
        }
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::build_article;
    use crate::timeline::{Scene, Timeline, TimelineError};
    use chrono::Utc;

    fn article(title: &str) -> Article {
        build_article(title, "https://en.wikipedia.org/wiki/X", "Body text.", None, 500, 1000)
    }

    fn script(texts: &[&str]) -> Script {
        let scenes = texts.iter().map(|t| Scene::new(*t, 2.0, "shot")).collect();
        Script::new(texts.join(" "), Timeline::from_scenes(scenes).unwrap())
    }

    #[test]
    fn test_tokens_increase() {
        let session = EditorSession::new();
        let first = session.begin_request();
        let second = session.begin_request();
        assert!(second > first);
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[test]
    fn test_stale_script_discarded() {
        let mut session = EditorSession::new();
        let slow = session.begin_request();
        let fast = session.begin_request();

        let applied = session.complete_script(fast, Ok(script(&["New"]))).unwrap();
        assert_eq!(applied, Applied::Applied);

        let applied = session.complete_script(slow, Ok(script(&["Old"]))).unwrap();
        assert_eq!(applied, Applied::Stale);
        assert_eq!(session.script().unwrap().script, "New");
    }

    #[test]
    fn test_stale_failure_ignored() {
        let mut session = EditorSession::new();
        let slow = session.begin_request();
        let _fast = session.begin_request();

        let result = session.complete_article(slow, Err(StoryreelError::RateLimited));
        assert_eq!(result.unwrap(), Applied::Stale);
    }

    #[test]
    fn test_failure_keeps_state() {
        let mut session = EditorSession::new();
        let token = session.begin_request();
        session.complete_script(token, Ok(script(&["Kept"]))).unwrap();

        let token = session.begin_request();
        let result = session.complete_script(token, Err(StoryreelError::QuotaExhausted));
        assert!(matches!(result, Err(StoryreelError::QuotaExhausted)));
        assert_eq!(session.script().unwrap().script, "Kept");
    }

    #[test]
    fn test_new_article_clears_script() {
        let mut session = EditorSession::new();
        let token = session.begin_request();
        session.complete_article(token, Ok(article("First"))).unwrap();
        let token = session.begin_request();
        session.complete_script(token, Ok(script(&["A", "B"]))).unwrap();

        let token = session.begin_request();
        session.complete_article(token, Ok(article("Second"))).unwrap();
        assert_eq!(session.article().unwrap().title, "Second");
        assert!(session.script().is_none());
    }

    #[test]
    fn test_apply_edit_reclamps_selection() {
        let mut session = EditorSession::new();
        let token = session.begin_request();
        session.complete_script(token, Ok(script(&["A", "B", "C"]))).unwrap();

        session.select(2).unwrap();
        session.apply_edit(&SceneEdit::Delete { index: 2 }).unwrap();
        assert_eq!(session.selection().index, 1);
        assert_eq!(session.script().unwrap().estimated_duration, 4.0);
    }

    #[test]
    fn test_edit_errors_leave_script() {
        let mut session = EditorSession::new();
        assert!(matches!(
            session.apply_edit(&SceneEdit::Split { index: 0 }),
            Err(StoryreelError::InvalidInput(_))
        ));

        let token = session.begin_request();
        session.complete_script(token, Ok(script(&["Only"]))).unwrap();
        let result = session.apply_edit(&SceneEdit::Delete { index: 0 });
        assert!(matches!(
            result,
            Err(StoryreelError::Timeline(TimelineError::CannotDeleteLastScene))
        ));
        assert_eq!(session.script().unwrap().scenes.len(), 1);

        assert!(session.select(-1).is_err());
    }

    #[test]
    fn test_load_project_replaces_everything() {
        let mut session = EditorSession::new();
        let pending = session.begin_request();

        let project = Project {
            id: Uuid::new_v4(),
            title: "Saved".to_string(),
            url: String::new(),
            article_data: Some(article("Saved")),
            script: Some(script(&["One", "Two"])),
            settings: VideoSettings { font_size: 40, ..Default::default() },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = project.id;
        session.load_project(project);

        assert_eq!(session.project_id(), Some(id));
        assert_eq!(session.settings().font_size, 40);
        assert_eq!(
            session.complete_script(pending, Ok(script(&["Late"]))).unwrap(),
            Applied::Stale
        );

        let document = session.to_document("Copy");
        assert_eq!(document.script.unwrap().scenes.len(), 2);
        assert_eq!(document.article_data.unwrap().title, "Saved");
    }
}
