//! Proportional layout of scenes along a fixed-width track.

use super::Timeline;
use serde::Serialize;

/// Render data for one scene segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLayout {
    pub index: usize,
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds.
    pub end: f64,
    /// Left edge as a fraction of the track width.
    pub left_fraction: f64,
    /// Segment width as a fraction of the track width.
    pub width_fraction: f64,
}

impl Timeline {
    /// Segments for every scene. Empty when the total duration is zero.
    pub fn layout(&self) -> Vec<SceneLayout> {
        let total = self.total_duration();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut start = 0.0;
        self.scenes()
            .iter()
            .enumerate()
            .map(|(index, scene)| {
                let end = start + scene.duration;
                let segment = SceneLayout {
                    index,
                    start,
                    end,
                    left_fraction: start / total,
                    width_fraction: scene.duration / total,
                };
                start = end;
                segment
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::timeline::{Scene, Timeline};

    #[test]
    fn test_layout_fills_track() {
        let t = Timeline::from_scenes(vec![
            Scene::new("A", 10.0, ""),
            Scene::new("B", 20.0, ""),
            Scene::new("C", 10.0, ""),
        ])
        .unwrap();

        let layout = t.layout();
        assert_eq!(layout.len(), 3);
        assert_eq!(layout[0].left_fraction, 0.0);
        assert_eq!(layout[1].start, 10.0);
        assert_eq!(layout[1].left_fraction, 0.25);
        assert_eq!(layout[1].width_fraction, 0.5);
        assert_eq!(layout[2].end, 40.0);

        let widths: f64 = layout.iter().map(|s| s.width_fraction).sum();
        assert!((widths - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_layout_empty_timeline() {
        assert!(Timeline::new().layout().is_empty());
    }
}
