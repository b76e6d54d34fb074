//! Edit commands and editor selection state.
//!
//! Every control of an editing surface maps to exactly one [`SceneEdit`]. Indices
//! are signed because they arrive from JSON bodies and command lines, so a negative
//! index is reported as out of range instead of failing to parse.

use super::{Timeline, TimelineResult};
use serde::{Deserialize, Serialize};

/// A single edit to a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SceneEdit {
    /// Replace the narration text of a scene.
    SetText { index: i64, text: String },
    /// Replace the duration of a scene.
    SetDuration { index: i64, duration: f64 },
    /// Replace the visual suggestion of a scene.
    SetVisual { index: i64, text: String },
    /// Remove a scene.
    Delete { index: i64 },
    /// Split a scene at its text midpoint.
    Split { index: i64 },
}

impl SceneEdit {
    /// Apply this edit, returning the new timeline.
    pub fn apply(&self, timeline: &Timeline) -> TimelineResult<Timeline> {
        match self {
            Self::SetText { index, text } => {
                timeline.set_scene_text(timeline.checked_index(*index)?, text.clone())
            }
            Self::SetDuration { index, duration } => {
                timeline.set_scene_duration(timeline.checked_index(*index)?, *duration)
            }
            Self::SetVisual { index, text } => {
                timeline.set_scene_visual(timeline.checked_index(*index)?, text.clone())
            }
            Self::Delete { index } => {
                // The last-scene rule wins over the bounds check.
                if timeline.len() == 1 {
                    return timeline.delete_scene(0);
                }
                timeline.delete_scene(timeline.checked_index(*index)?)
            }
            Self::Split { index } => timeline.split_scene(timeline.checked_index(*index)?),
        }
    }

    /// Index of the scene this edit targets.
    pub fn index(&self) -> i64 {
        match self {
            Self::SetText { index, .. }
            | Self::SetDuration { index, .. }
            | Self::SetVisual { index, .. }
            | Self::Delete { index }
            | Self::Split { index } => *index,
        }
    }

    /// What happened to the scene, e.g. `Scene 2 split`.
    pub fn describe(&self) -> String {
        let outcome = match self {
            Self::SetText { .. } => "text updated",
            Self::SetDuration { .. } => "duration updated",
            Self::SetVisual { .. } => "visual suggestion updated",
            Self::Delete { .. } => "deleted",
            Self::Split { .. } => "split",
        };
        format!("Scene {} {}", self.index(), outcome)
    }

    /// The attempted action, e.g. `split scene 2`, for failure messages.
    pub fn attempt(&self) -> String {
        let verb = match self {
            Self::SetText { .. } => "update the text of",
            Self::SetDuration { .. } => "change the duration of",
            Self::SetVisual { .. } => "update the visual suggestion of",
            Self::Delete { .. } => "delete",
            Self::Split { .. } => "split",
        };
        format!("{} scene {}", verb, self.index())
    }
}

/// Selected scene in an editor.
///
/// The index must be re-clamped whenever the timeline length changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub index: usize,
}

impl Selection {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Clamp into `[0, len - 1]` (or 0 for an empty timeline).
    pub fn clamp(self, len: usize) -> Self {
        Self {
            index: self.index.min(len.saturating_sub(1)),
        }
    }
}

/// Range and step the editor slider allows for scene durations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneBounds {
    pub min_seconds: f64,
    pub max_seconds: f64,
    pub step_seconds: f64,
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self {
            min_seconds: 1.0,
            max_seconds: 30.0,
            step_seconds: 0.5,
        }
    }
}

impl SceneBounds {
    /// Check that the range is usable: finite, positive minimum, `min <= max`
    /// and a non-negative step.
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_seconds.is_finite() || self.min_seconds <= 0.0 {
            return Err(format!(
                "editor.min_seconds must be a positive number, got {}",
                self.min_seconds
            ));
        }
        if !self.max_seconds.is_finite() || self.max_seconds < self.min_seconds {
            return Err(format!(
                "editor.max_seconds must be at least min_seconds ({}), got {}",
                self.min_seconds, self.max_seconds
            ));
        }
        if !self.step_seconds.is_finite() || self.step_seconds < 0.0 {
            return Err(format!(
                "editor.step_seconds must be zero or positive, got {}",
                self.step_seconds
            ));
        }
        Ok(())
    }

    /// Snap to the nearest step and clamp into range.
    ///
    /// Never panics, even on bounds that fail [`SceneBounds::validate`].
    pub fn clamp(&self, seconds: f64) -> f64 {
        let snapped = if self.step_seconds > 0.0 {
            (seconds / self.step_seconds).round() * self.step_seconds
        } else {
            seconds
        };
        let (lo, hi) = if self.min_seconds <= self.max_seconds {
            (self.min_seconds, self.max_seconds)
        } else {
            (self.max_seconds, self.min_seconds)
        };
        snapped.max(lo).min(hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{Scene, TimelineError};

    fn two_scenes() -> Timeline {
        Timeline::from_scenes(vec![
            Scene::new("Hello", 4.0, "title card"),
            Scene::new("World", 6.0, "globe"),
        ])
        .unwrap()
    }

    #[test]
    fn test_edit_from_json() {
        let edit: SceneEdit =
            serde_json::from_str(r#"{"op": "set_duration", "index": 1, "duration": 2.5}"#).unwrap();
        let t = edit.apply(&two_scenes()).unwrap();
        assert_eq!(t.scenes()[1].duration, 2.5);

        let edit: SceneEdit = serde_json::from_str(r#"{"op": "split", "index": 0}"#).unwrap();
        let t = edit.apply(&two_scenes()).unwrap();
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_negative_index_is_out_of_range() {
        let edit = SceneEdit::SetText {
            index: -1,
            text: "x".to_string(),
        };
        assert_eq!(
            edit.apply(&two_scenes()),
            Err(TimelineError::IndexOutOfRange { index: -1, len: 2 })
        );
    }

    #[test]
    fn test_delete_last_scene_via_edit() {
        let single = Timeline::from_scenes(vec![Scene::new("only", 3.0, "")]).unwrap();
        assert_eq!(
            SceneEdit::Delete { index: 0 }.apply(&single),
            Err(TimelineError::CannotDeleteLastScene)
        );
        assert_eq!(
            SceneEdit::Delete { index: 7 }.apply(&single),
            Err(TimelineError::CannotDeleteLastScene)
        );
    }

    #[test]
    fn test_edit_messages() {
        let split = SceneEdit::Split { index: 2 };
        assert_eq!(split.describe(), "Scene 2 split");
        assert_eq!(split.attempt(), "split scene 2");

        let text = SceneEdit::SetText {
            index: 0,
            text: "x".to_string(),
        };
        assert_eq!(text.describe(), "Scene 0 text updated");
        assert_eq!(text.attempt(), "update the text of scene 0");
    }

    #[test]
    fn test_selection_clamp() {
        assert_eq!(Selection::new(4).clamp(3).index, 2);
        assert_eq!(Selection::new(1).clamp(3).index, 1);
        assert_eq!(Selection::new(2).clamp(0).index, 0);
    }

    #[test]
    fn test_scene_bounds_clamp() {
        let bounds = SceneBounds::default();
        assert_eq!(bounds.clamp(0.2), 1.0);
        assert_eq!(bounds.clamp(45.0), 30.0);
        assert_eq!(bounds.clamp(7.3), 7.5);
        assert_eq!(bounds.clamp(7.2), 7.0);
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let bounds = SceneBounds {
            min_seconds: 10.0,
            max_seconds: 5.0,
            step_seconds: 0.5,
        };
        assert!(bounds.validate().is_err());
        assert_eq!(bounds.clamp(7.0), 7.0);
        assert_eq!(bounds.clamp(2.0), 5.0);

        let nan = SceneBounds {
            min_seconds: f64::NAN,
            ..SceneBounds::default()
        };
        assert!(nan.validate().is_err());
        assert!(nan.clamp(7.0).is_finite());
    }

    #[test]
    fn test_bounds_validation() {
        assert!(SceneBounds::default().validate().is_ok());
        let zero_min = SceneBounds {
            min_seconds: 0.0,
            ..SceneBounds::default()
        };
        assert!(zero_min.validate().is_err());
        let negative_step = SceneBounds {
            step_seconds: -0.5,
            ..SceneBounds::default()
        };
        assert!(negative_step.validate().is_err());
    }
}
