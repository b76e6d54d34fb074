//! Pipeline orchestrator for Storyreel.
//!
//! Wires the collaborators from settings and runs the article to storyboard
//! flow through an [`EditorSession`].
//!
//! Flows take the session behind a [`Mutex`] and hold the lock only to issue a
//! request token and to apply the response, so several requests against one
//! session may be in flight at once. Only the latest one lands.

use crate::article::{Article, ArticleFetcher, WikipediaFetcher};
use crate::config::{Prompts, Settings};
use crate::error::{Result, StoryreelError};
use crate::narration::{Narration, NarrationRequest, NarrationVoice, OpenAISynthesizer, Synthesizer};
use crate::project::{ProjectStore, SqliteProjectStore};
use crate::script::{OpenAIScriptGenerator, Script, ScriptGenerator, ScriptRequest, ScriptStyle};
use crate::session::{Applied, EditorSession};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// The main orchestrator for the Storyreel pipeline.
pub struct Orchestrator {
    settings: Settings,
    fetcher: Arc<dyn ArticleFetcher>,
    generator: Arc<dyn ScriptGenerator>,
    synthesizer: Arc<dyn Synthesizer>,
    store: Arc<dyn ProjectStore>,
}

impl Orchestrator {
    /// Create an orchestrator with the Wikipedia, OpenAI and SQLite backends.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let fetcher = Arc::new(WikipediaFetcher::with_settings(&settings.wikipedia));

        info!("Using script model {}", settings.script.model);
        let generator = Arc::new(
            OpenAIScriptGenerator::new(&settings.script.model)
                .with_prompts(prompts)
                .with_max_content_chars(settings.script.max_content_chars),
        );

        let synthesizer = Arc::new(OpenAISynthesizer::new(&settings.narration.model));

        let store = Arc::new(SqliteProjectStore::new(&settings.sqlite_path())?);

        Ok(Self {
            settings,
            fetcher,
            generator,
            synthesizer,
            store,
        })
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        fetcher: Arc<dyn ArticleFetcher>,
        generator: Arc<dyn ScriptGenerator>,
        synthesizer: Arc<dyn Synthesizer>,
        store: Arc<dyn ProjectStore>,
    ) -> Self {
        Self {
            settings,
            fetcher,
            generator,
            synthesizer,
            store,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn fetcher(&self) -> Arc<dyn ArticleFetcher> {
        self.fetcher.clone()
    }

    pub fn generator(&self) -> Arc<dyn ScriptGenerator> {
        self.generator.clone()
    }

    pub fn synthesizer(&self) -> Arc<dyn Synthesizer> {
        self.synthesizer.clone()
    }

    pub fn store(&self) -> Arc<dyn ProjectStore> {
        self.store.clone()
    }

    /// Build a script request for an article using configured defaults.
    pub fn script_request(
        &self,
        article: &Article,
        duration: Option<u32>,
        style: Option<ScriptStyle>,
    ) -> ScriptRequest {
        ScriptRequest::new(article.full_content.clone(), article.title.clone())
            .with_duration(duration.unwrap_or(self.settings.script.default_duration_seconds))
            .with_style(style.unwrap_or(self.settings.script.default_style))
    }

    /// Fetch an article into the session.
    #[instrument(skip(self, session))]
    pub async fn load_article(&self, session: &Mutex<EditorSession>, url: &str) -> Result<Applied> {
        let token = session.lock().await.begin_request();
        let response = self.fetcher.fetch(url).await;
        let applied = session.lock().await.complete_article(token, response)?;
        if applied == Applied::Stale {
            debug!("Discarded superseded article response");
        }
        Ok(applied)
    }

    /// Generate a script for the session's article.
    #[instrument(skip(self, session))]
    pub async fn generate_script(
        &self,
        session: &Mutex<EditorSession>,
        duration: Option<u32>,
        style: Option<ScriptStyle>,
    ) -> Result<Applied> {
        let (request, token) = {
            let guard = session.lock().await;
            let article = guard
                .article()
                .ok_or_else(|| StoryreelError::InvalidInput("Fetch an article first".to_string()))?;
            (self.script_request(article, duration, style), guard.begin_request())
        };

        let response = self.generator.generate(&request).await;
        let applied = session.lock().await.complete_script(token, response)?;
        if applied == Applied::Stale {
            debug!("Discarded superseded script response");
        }
        Ok(applied)
    }

    /// Fetch an article and generate its storyboard in one go.
    #[instrument(skip(self))]
    pub async fn create_storyboard(
        &self,
        url: &str,
        duration: Option<u32>,
        style: Option<ScriptStyle>,
    ) -> Result<EditorSession> {
        let session = Mutex::new(EditorSession::new());
        self.load_article(&session, url).await?;
        self.generate_script(&session, duration, style).await?;
        Ok(session.into_inner())
    }

    /// Synthesize narration for a whole script.
    #[instrument(skip(self, script))]
    pub async fn narrate(
        &self,
        script: &Script,
        voice: Option<NarrationVoice>,
        speed: Option<f32>,
    ) -> Result<Narration> {
        let mut request = NarrationRequest::new(script.script.clone());
        request.voice = voice.unwrap_or(self.settings.narration.voice);
        request.speed = speed.unwrap_or(self.settings.narration.speed);
        self.synthesizer.synthesize(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::build_article;
    use crate::project::MemoryProjectStore;
    use crate::timeline::{Scene, Timeline};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    struct FixedFetcher;

    #[async_trait]
    impl ArticleFetcher for FixedFetcher {
        async fn fetch(&self, url: &str) -> Result<Article> {
            if url.contains("Missing") {
                return Err(StoryreelError::ArticleNotFound(url.to_string()));
            }
            Ok(build_article("Eiffel Tower", url, "A tall tower in Paris.", None, 500, 1000))
        }
    }

    struct EchoGenerator;

    #[async_trait]
    impl ScriptGenerator for EchoGenerator {
        async fn generate(&self, request: &ScriptRequest) -> Result<Script> {
            let scenes = Timeline::from_scenes(vec![Scene::new(
                request.content.clone(),
                f64::from(request.duration),
                "Establishing shot",
            )])?;
            Ok(Script::new(request.content.clone(), scenes))
        }
    }

    struct SilentSynthesizer;

    #[async_trait]
    impl Synthesizer for SilentSynthesizer {
        async fn synthesize(&self, request: &NarrationRequest) -> Result<Narration> {
            request.validate()?;
            Ok(Narration {
                audio_base64: String::new(),
                format: "mp3".to_string(),
                estimated_duration: crate::narration::estimate_duration(&request.text),
                voice: request.voice,
                speed: request.speed,
            })
        }
    }

    fn orchestrator() -> Orchestrator {
        Orchestrator::with_components(
            Settings::default(),
            Arc::new(FixedFetcher),
            Arc::new(EchoGenerator),
            Arc::new(SilentSynthesizer),
            Arc::new(MemoryProjectStore::new()),
        )
    }

    #[tokio::test]
    async fn test_create_storyboard() {
        let session = orchestrator()
            .create_storyboard("https://en.wikipedia.org/wiki/Eiffel_Tower", Some(30), None)
            .await
            .unwrap();

        assert_eq!(session.article().unwrap().title, "Eiffel Tower");
        let script = session.script().unwrap();
        assert_eq!(script.scenes.len(), 1);
        assert_eq!(script.estimated_duration, 30.0);
    }

    #[tokio::test]
    async fn test_generate_requires_article() {
        let session = Mutex::new(EditorSession::new());
        let result = orchestrator().generate_script(&session, None, None).await;
        assert!(matches!(result, Err(StoryreelError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_article() {
        let orchestrator = orchestrator();
        let session = Mutex::new(EditorSession::new());
        orchestrator
            .load_article(&session, "https://en.wikipedia.org/wiki/Eiffel_Tower")
            .await
            .unwrap();

        let result = orchestrator
            .load_article(&session, "https://en.wikipedia.org/wiki/Missing")
            .await;
        assert!(matches!(result, Err(StoryreelError::ArticleNotFound(_))));
        assert_eq!(session.lock().await.article().unwrap().title, "Eiffel Tower");
    }

    /// Holds `Slow` fetches until released.
    struct GatedFetcher {
        started: Arc<Notify>,
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl ArticleFetcher for GatedFetcher {
        async fn fetch(&self, url: &str) -> Result<Article> {
            if url.contains("Slow") {
                self.started.notify_one();
                self.gate.notified().await;
                return Ok(build_article("Slow Tower", url, "Old news.", None, 500, 1000));
            }
            Ok(build_article("Eiffel Tower", url, "A tall tower in Paris.", None, 500, 1000))
        }
    }

    #[tokio::test]
    async fn test_overlapping_fetches_keep_latest() {
        let started = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());
        let orchestrator = Orchestrator::with_components(
            Settings::default(),
            Arc::new(GatedFetcher {
                started: started.clone(),
                gate: gate.clone(),
            }),
            Arc::new(EchoGenerator),
            Arc::new(SilentSynthesizer),
            Arc::new(MemoryProjectStore::new()),
        );
        let session = Mutex::new(EditorSession::new());

        let slow = orchestrator.load_article(&session, "https://en.wikipedia.org/wiki/Slow");
        let fast = async {
            started.notified().await;
            let applied = orchestrator
                .load_article(&session, "https://en.wikipedia.org/wiki/Eiffel_Tower")
                .await;
            gate.notify_one();
            applied
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(fast.unwrap(), Applied::Applied);
        assert_eq!(slow.unwrap(), Applied::Stale);
        assert_eq!(session.lock().await.article().unwrap().title, "Eiffel Tower");
    }

    #[tokio::test]
    async fn test_narrate_uses_defaults() {
        let orchestrator = orchestrator();
        let script = Script::new(
            "one two three four five",
            Timeline::from_scenes(vec![Scene::new("one two three four five", 2.0, "")]).unwrap(),
        );

        let narration = orchestrator.narrate(&script, None, None).await.unwrap();
        assert_eq!(narration.voice, NarrationVoice::Alloy);
        assert_eq!(narration.speed, 1.0);
        assert_eq!(narration.estimated_duration, 2.0);
    }
}
