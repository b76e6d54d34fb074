//! Projects command implementation.

use crate::cli::output::format_duration;
use crate::cli::{read_document, write_document, Output, ProjectAction};
use crate::config::Settings;
use crate::project::{find_template, NewProject, ProjectStore, SqliteProjectStore};
use anyhow::Result;
use uuid::Uuid;

/// Run the projects command.
pub async fn run_projects(action: &ProjectAction, settings: Settings) -> Result<()> {
    let store = SqliteProjectStore::new(&settings.sqlite_path())?;

    match action {
        ProjectAction::List { limit } => {
            let limit = limit.unwrap_or(settings.store.page_size);
            let projects = store.list(limit).await?;

            if projects.is_empty() {
                Output::info("No projects saved yet. Use 'storyreel projects save <file>' to add one.");
            } else {
                Output::header(&format!("Projects ({})", projects.len()));
                println!();
                for project in &projects {
                    Output::project_info(project);
                }
            }
        }

        ProjectAction::Show { id } => {
            let id = parse_id(id)?;
            let Some(project) = store.get(&id).await? else {
                Output::error(&format!("Project not found: {}", id));
                return Ok(());
            };

            Output::header(&project.title);
            Output::kv("Id", &project.id.to_string());
            if !project.url.is_empty() {
                Output::kv("Article", &project.url);
            }
            Output::kv("Created", &project.created_at.format("%Y-%m-%d %H:%M").to_string());
            Output::kv("Updated", &project.updated_at.format("%Y-%m-%d %H:%M").to_string());

            match &project.script {
                Some(script) => {
                    Output::kv("Scenes", &script.scenes.len().to_string());
                    Output::kv("Words", &script.word_count.to_string());
                    Output::kv("Duration", &format_duration(script.estimated_duration));
                }
                None => Output::kv("Script", "none"),
            }

            let settings = &project.settings;
            let template = settings
                .template
                .as_deref()
                .and_then(find_template)
                .map(|t| t.name)
                .unwrap_or("none");
            Output::kv("Template", template);
            Output::kv("Subtitles", if settings.include_subtitles { "on" } else { "off" });
            Output::kv("Font size", &format!("{}px", settings.font_size));
        }

        ProjectAction::Save { file, title, id } => {
            let mut document: NewProject = read_document(file)?;
            if let Some(title) = title {
                document.title = title.clone();
            }

            let project = match id {
                Some(id) => store.update(&parse_id(id)?, document).await?,
                None => store.create(document).await?,
            };

            Output::success(&format!("Saved '{}' as {}", project.title, project.id));
        }

        ProjectAction::Open { id, output } => {
            let id = parse_id(id)?;
            let Some(project) = store.get(&id).await? else {
                Output::error(&format!("Project not found: {}", id));
                return Ok(());
            };

            let document = NewProject {
                title: project.title,
                url: project.url,
                article_data: project.article_data,
                script: project.script,
                settings: project.settings,
            };
            write_document(&document, output.as_deref())?;
        }

        ProjectAction::Delete { id } => {
            let id = parse_id(id)?;
            if store.delete(&id).await? {
                Output::success(&format!("Deleted project {}", id));
            } else {
                Output::warning(&format!("Project not found: {}", id));
            }
        }
    }

    Ok(())
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|e| anyhow::anyhow!("Invalid project id '{}': {}", id, e))
}
