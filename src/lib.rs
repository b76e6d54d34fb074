//! Storyreel - Wikipedia to video storyboard
//!
//! A CLI tool and HTTP service for turning Wikipedia articles into editable
//! storyboards for short narrated videos.
//!
//! # Overview
//!
//! Storyreel allows you to:
//! - Fetch a Wikipedia article and split it into sections
//! - Have a chat model write a narration script broken into timed scenes
//! - Edit scenes on a timeline (text, duration, visuals, delete, split)
//! - Synthesize narration audio
//! - Export the storyboard as JSON or subtitles, and save projects
//!
//! # Architecture
//!
//! - `timeline` - Scene list, pure edit operations and layout
//! - `script` - Script generation and storyboard export
//! - `article` - Article fetching and section parsing
//! - `narration` - Text-to-speech
//! - `project` - Project persistence and video templates
//! - `session` - Editor state with request sequencing
//! - `orchestrator` - Collaborator wiring
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use storyreel::config::Settings;
//! use storyreel::orchestrator::Orchestrator;
//! use storyreel::timeline::SceneEdit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let mut session = orchestrator
//!         .create_storyboard("https://en.wikipedia.org/wiki/Eiffel_Tower", Some(60), None)
//!         .await?;
//!     session.apply_edit(&SceneEdit::Split { index: 0 })?;
//!
//!     if let Some(script) = session.script() {
//!         println!("{} scenes, {:.1}s", script.scenes.len(), script.estimated_duration);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod article;
pub mod cli;
pub mod config;
pub mod error;
pub mod narration;
pub mod openai;
pub mod orchestrator;
pub mod project;
pub mod script;
pub mod session;
pub mod timeline;

pub use error::{Result, StoryreelError};
