//! Built-in video templates.

use serde::Serialize;

/// A named visual style for the rendered video.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub font_family: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub transition_style: &'static str,
    pub music_genre: &'static str,
}

const TEMPLATES: &[VideoTemplate] = &[
    VideoTemplate {
        id: "cinematic",
        name: "Cinematic",
        description: "Epic, dramatic style with sweeping transitions",
        font_family: "serif",
        primary_color: "#FFD700",
        secondary_color: "#1A1A2E",
        transition_style: "fade-zoom",
        music_genre: "epic",
    },
    VideoTemplate {
        id: "modern",
        name: "Modern",
        description: "Clean, minimalist design with smooth animations",
        font_family: "sans-serif",
        primary_color: "#00D9FF",
        secondary_color: "#FF6B6B",
        transition_style: "slide",
        music_genre: "electronic",
    },
    VideoTemplate {
        id: "educational",
        name: "Educational",
        description: "Clear, informative layout perfect for learning",
        font_family: "system-ui",
        primary_color: "#4CAF50",
        secondary_color: "#2196F3",
        transition_style: "cut",
        music_genre: "ambient",
    },
    VideoTemplate {
        id: "dynamic",
        name: "Dynamic",
        description: "High-energy with fast-paced transitions",
        font_family: "sans-serif",
        primary_color: "#FF3366",
        secondary_color: "#9933FF",
        transition_style: "flash",
        music_genre: "upbeat",
    },
];

/// All built-in templates in display order.
pub fn templates() -> &'static [VideoTemplate] {
    TEMPLATES
}

/// Look up a template by id (case-insensitive).
pub fn find_template(id: &str) -> Option<&'static VideoTemplate> {
    TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue() {
        let ids: Vec<&str> = templates().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["cinematic", "modern", "educational", "dynamic"]);
    }

    #[test]
    fn test_find_template() {
        let template = find_template("Educational").unwrap();
        assert_eq!(template.transition_style, "cut");
        assert!(find_template("retro").is_none());
    }

    #[test]
    fn test_template_json_shape() {
        let json = serde_json::to_value(find_template("cinematic").unwrap()).unwrap();
        assert_eq!(json["primaryColor"], "#FFD700");
        assert_eq!(json["musicGenre"], "epic");
    }
}
