//! Storyboard documents on disk.
//!
//! A document is the JSON form of a project without id or timestamps, so it
//! can be saved to and opened from the project store unchanged.

use crate::project::NewProject;
use anyhow::{Context, Result};
use std::path::Path;

/// Read a storyboard document.
pub fn read_document(path: impl AsRef<Path>) -> Result<NewProject> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read storyboard {}", path.display()))?;
    let document = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a storyboard document", path.display()))?;
    Ok(document)
}

/// Write a storyboard document, or print it when `path` is `None` or `-`.
pub fn write_document(document: &NewProject, path: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    match path {
        Some(p) if p != "-" => {
            std::fs::write(p, json).with_context(|| format!("Failed to write {}", p))?;
        }
        _ => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;
    use crate::timeline::{Scene, Timeline};

    #[test]
    fn test_document_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tower.json");

        let script = Script::new(
            "Hello there.",
            Timeline::from_scenes(vec![Scene::new("Hello there.", 3.0, "Title")]).unwrap(),
        );
        let document = NewProject::new("Tower").with_script(script.clone());
        write_document(&document, path.to_str()).unwrap();

        let loaded = read_document(&path).unwrap();
        assert_eq!(loaded.title, "Tower");
        assert_eq!(loaded.script, Some(script));
    }

    #[test]
    fn test_rejects_invalid_scenes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"title": "Bad", "script": {"script": "x", "scenes": [{"text": "x", "duration": 0}]}}"#,
        )
        .unwrap();

        assert!(read_document(&path).is_err());
    }
}
