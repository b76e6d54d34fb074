//! Edit command implementation.
//!
//! Applies one scene edit to a storyboard document and rewrites it.

use crate::cli::output::format_duration;
use crate::cli::{read_document, write_document, EditAction, Output};
use crate::config::Settings;
use crate::session::EditorSession;
use crate::timeline::{SceneBounds, SceneEdit};
use anyhow::Result;

/// Run the edit command.
pub fn run_edit(file: &str, action: &EditAction, settings: Settings) -> Result<()> {
    let document = read_document(file)?;
    let title = document.title.clone();
    let mut session = EditorSession::from_document(document);

    let edit = match to_scene_edit(action, &settings.editor) {
        Some(edit) => edit,
        None => return show(&session, &title),
    };

    if let Err(e) = session.apply_edit(&edit) {
        Output::error(&format!("Cannot {}: {}", edit.attempt(), e));
        return Err(e.into());
    }

    write_document(&session.to_document(&title), Some(file))?;

    if let Some(script) = session.script() {
        Output::success(&format!(
            "{} ({} scenes, {})",
            edit.describe(),
            script.scenes.len(),
            format_duration(script.estimated_duration)
        ));
    }

    Ok(())
}

/// Map a CLI action to a scene edit; `None` for `show`.
///
/// Durations are snapped into the editor range. Non-positive values are
/// passed through so the timeline reports them.
fn to_scene_edit(action: &EditAction, bounds: &SceneBounds) -> Option<SceneEdit> {
    let edit = match action {
        EditAction::Show => return None,
        EditAction::SetText { index, text } => SceneEdit::SetText {
            index: *index,
            text: text.clone(),
        },
        EditAction::SetDuration { index, seconds } => {
            let duration = if seconds.is_finite() && *seconds > 0.0 {
                bounds.clamp(*seconds)
            } else {
                *seconds
            };
            SceneEdit::SetDuration {
                index: *index,
                duration,
            }
        }
        EditAction::SetVisual { index, text } => SceneEdit::SetVisual {
            index: *index,
            text: text.clone(),
        },
        EditAction::Delete { index } => SceneEdit::Delete { index: *index },
        EditAction::Split { index } => SceneEdit::Split { index: *index },
    };
    Some(edit)
}

fn show(session: &EditorSession, title: &str) -> Result<()> {
    let Some(script) = session.script() else {
        Output::warning(&format!("'{}' has no script yet.", title));
        return Ok(());
    };

    Output::header(title);
    Output::kv("Scenes", &script.scenes.len().to_string());
    Output::kv("Words", &script.word_count.to_string());
    Output::kv("Duration", &format_duration(script.scenes.total_duration()));

    for (scene, layout) in script.scenes.scenes().iter().zip(script.scenes.layout()) {
        Output::scene(scene, &layout);
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::NewProject;
    use crate::script::Script;
    use crate::timeline::{Scene, Timeline};

    fn write_sample(dir: &std::path::Path) -> String {
        let script = Script::new(
            "Hello world. Second scene.",
            Timeline::from_scenes(vec![
                Scene::new("Hello world.", 4.0, "Title"),
                Scene::new("Second scene.", 4.0, "Map"),
            ])
            .unwrap(),
        );
        let path = dir.join("story.json");
        let path_str = path.to_string_lossy().to_string();
        write_document(&NewProject::new("Story").with_script(script), Some(&path_str)).unwrap();
        path_str
    }

    #[test]
    fn test_duration_snaps_to_bounds() {
        let bounds = SceneBounds::default();
        let edit = to_scene_edit(&EditAction::SetDuration { index: 0, seconds: 45.0 }, &bounds);
        assert_eq!(edit, Some(SceneEdit::SetDuration { index: 0, duration: 30.0 }));

        let edit = to_scene_edit(&EditAction::SetDuration { index: 0, seconds: -2.0 }, &bounds);
        assert_eq!(edit, Some(SceneEdit::SetDuration { index: 0, duration: -2.0 }));

        assert_eq!(to_scene_edit(&EditAction::Show, &bounds), None);
    }

    #[test]
    fn test_split_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path());

        run_edit(&path, &EditAction::Split { index: 0 }, Settings::default()).unwrap();

        let script = read_document(&path).unwrap().script.unwrap();
        assert_eq!(script.scenes.len(), 3);
        assert_eq!(script.estimated_duration, 8.0);
    }

    #[test]
    fn test_failed_edit_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path());
        let before = std::fs::read_to_string(&path).unwrap();

        assert!(run_edit(&path, &EditAction::Delete { index: 5 }, Settings::default()).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}
