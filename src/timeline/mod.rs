//! Scene timeline model.
//!
//! A [`Timeline`] is an ordered list of [`Scene`]s in playback order. Positions,
//! widths and the total duration are always derived from the scene durations and
//! never cached. Every operation is pure: it borrows the current timeline and returns
//! a new one, leaving the original untouched on error.

mod edit;
mod layout;

pub use edit::{SceneBounds, SceneEdit, Selection};
pub use layout::SceneLayout;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by timeline operations.
///
/// Each condition is distinct so callers can show operation-specific guidance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error("Scene index {index} is out of range (timeline has {len} scenes)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Invalid scene duration: {0} (must be a positive number of seconds)")]
    InvalidDuration(f64),

    #[error("Cannot delete the last scene")]
    CannotDeleteLastScene,

    #[error("Width is undefined for a timeline with zero total duration")]
    DivisionUndefined,
}

impl TimelineError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            TimelineError::IndexOutOfRange { .. } => "index_out_of_range",
            TimelineError::InvalidDuration(_) => "invalid_duration",
            TimelineError::CannotDeleteLastScene => "cannot_delete_last_scene",
            TimelineError::DivisionUndefined => "division_undefined",
        }
    }
}

/// Result type alias for timeline operations.
pub type TimelineResult<T> = std::result::Result<T, TimelineError>;

/// One timed narration segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Narration text for this segment.
    pub text: String,
    /// Duration in seconds.
    pub duration: f64,
    /// Free-text description of the visual to show.
    #[serde(default)]
    pub visual_suggestion: String,
}

impl Scene {
    pub fn new(text: impl Into<String>, duration: f64, visual_suggestion: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration,
            visual_suggestion: visual_suggestion.into(),
        }
    }

    /// Number of whitespace-separated words in the narration.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Ordered collection of scenes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Scene>", into = "Vec<Scene>")]
pub struct Timeline {
    scenes: Vec<Scene>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from scenes, rejecting non-positive durations.
    pub fn from_scenes(scenes: Vec<Scene>) -> TimelineResult<Self> {
        if let Some(scene) = scenes.iter().find(|s| !is_valid_duration(s.duration)) {
            return Err(TimelineError::InvalidDuration(scene.duration));
        }
        Ok(Self { scenes })
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn into_scenes(self) -> Vec<Scene> {
        self.scenes
    }

    /// Convert a signed index coming from an editing surface into a scene index.
    pub fn checked_index(&self, raw: i64) -> TimelineResult<usize> {
        usize::try_from(raw)
            .ok()
            .filter(|i| *i < self.scenes.len())
            .ok_or(TimelineError::IndexOutOfRange {
                index: raw,
                len: self.scenes.len(),
            })
    }

    fn check_index(&self, index: usize) -> TimelineResult<()> {
        if index < self.scenes.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> TimelineError {
        TimelineError::IndexOutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len: self.scenes.len(),
        }
    }

    /// Replace the narration text of one scene.
    pub fn set_scene_text(&self, index: usize, text: impl Into<String>) -> TimelineResult<Self> {
        self.check_index(index)?;
        let mut scenes = self.scenes.clone();
        scenes[index].text = text.into();
        Ok(Self { scenes })
    }

    /// Replace the duration of one scene.
    ///
    /// The caller owns any cached aggregate (such as a script's estimated
    /// duration) and must refresh it after this call.
    pub fn set_scene_duration(&self, index: usize, duration: f64) -> TimelineResult<Self> {
        self.check_index(index)?;
        if !is_valid_duration(duration) {
            return Err(TimelineError::InvalidDuration(duration));
        }
        let mut scenes = self.scenes.clone();
        scenes[index].duration = duration;
        Ok(Self { scenes })
    }

    /// Replace the visual suggestion of one scene.
    pub fn set_scene_visual(&self, index: usize, visual: impl Into<String>) -> TimelineResult<Self> {
        self.check_index(index)?;
        let mut scenes = self.scenes.clone();
        scenes[index].visual_suggestion = visual.into();
        Ok(Self { scenes })
    }

    /// Remove one scene. Later scenes shift down by one.
    pub fn delete_scene(&self, index: usize) -> TimelineResult<Self> {
        if self.scenes.len() == 1 {
            return Err(TimelineError::CannotDeleteLastScene);
        }
        self.check_index(index)?;
        let mut scenes = self.scenes.clone();
        scenes.remove(index);
        Ok(Self { scenes })
    }

    /// Split one scene in two at the character midpoint of its text.
    ///
    /// The first half gets `floor(chars / 2)` characters, each half gets half the
    /// duration, and both keep the visual suggestion. A duration too small to halve
    /// is rejected as [`TimelineError::InvalidDuration`].
    pub fn split_scene(&self, index: usize) -> TimelineResult<Self> {
        self.check_index(index)?;
        let scene = &self.scenes[index];
        let half = scene.duration / 2.0;
        if half <= 0.0 {
            return Err(TimelineError::InvalidDuration(scene.duration));
        }
        let (head, tail) = split_at_char_midpoint(&scene.text);

        let first = Scene::new(head, half, scene.visual_suggestion.clone());
        let second = Scene::new(tail, half, scene.visual_suggestion.clone());

        let mut scenes = self.scenes.clone();
        scenes.splice(index..=index, [first, second]);
        Ok(Self { scenes })
    }

    /// Cumulative duration of all scenes before `index`, for `index` in `[0, len]`.
    pub fn position(&self, index: usize) -> TimelineResult<f64> {
        if index > self.scenes.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.scenes[..index].iter().map(|s| s.duration).sum())
    }

    /// Sum of all scene durations; zero for an empty timeline.
    pub fn total_duration(&self) -> f64 {
        self.scenes.iter().map(|s| s.duration).sum()
    }

    /// Share of the total duration taken by one scene.
    ///
    /// Fails with [`TimelineError::DivisionUndefined`] when the total is zero
    /// rather than reporting zero.
    pub fn width_fraction(&self, index: usize) -> TimelineResult<f64> {
        self.check_index(index)?;
        let total = self.total_duration();
        if total <= 0.0 {
            return Err(TimelineError::DivisionUndefined);
        }
        Ok(self.scenes[index].duration / total)
    }

    /// Index of the scene playing at `seconds`, if any.
    pub fn scene_at(&self, seconds: f64) -> Option<usize> {
        if seconds < 0.0 {
            return None;
        }
        let mut start = 0.0;
        for (i, scene) in self.scenes.iter().enumerate() {
            let end = start + scene.duration;
            if seconds < end {
                return Some(i);
            }
            start = end;
        }
        None
    }

    /// Total number of narration words across all scenes.
    pub fn word_count(&self) -> usize {
        self.scenes.iter().map(Scene::word_count).sum()
    }
}

impl TryFrom<Vec<Scene>> for Timeline {
    type Error = TimelineError;

    fn try_from(scenes: Vec<Scene>) -> TimelineResult<Self> {
        Self::from_scenes(scenes)
    }
}

impl From<Timeline> for Vec<Scene> {
    fn from(timeline: Timeline) -> Self {
        timeline.scenes
    }
}

fn is_valid_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// Split text at `floor(chars / 2)`, respecting UTF-8 boundaries.
fn split_at_char_midpoint(text: &str) -> (String, String) {
    let mid = text.chars().count() / 2;
    let byte_mid = text
        .char_indices()
        .nth(mid)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let (head, tail) = text.split_at(byte_mid);
    (head.to_string(), tail.to_string())
}
