//! In-memory project store.
//!
//! Useful for testing and for the HTTP server when no database is wanted.

use super::{now, NewProject, Project, ProjectStore, ProjectSummary};
use crate::error::{Result, StoryreelError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory project store.
pub struct MemoryProjectStore {
    projects: RwLock<HashMap<Uuid, Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoryreelError {
    StoryreelError::ProjectStore(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn create(&self, project: NewProject) -> Result<Project> {
        project.validate()?;
        let project = project.into_project(Uuid::new_v4(), now());

        let mut projects = self.projects.write().map_err(poisoned)?;
        projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn list(&self, limit: usize) -> Result<Vec<ProjectSummary>> {
        let projects = self.projects.read().map_err(poisoned)?;

        let mut summaries: Vec<ProjectSummary> = projects.values().map(ProjectSummary::from).collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries.truncate(limit);
        Ok(summaries)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Project>> {
        let projects = self.projects.read().map_err(poisoned)?;
        Ok(projects.get(id).cloned())
    }

    async fn update(&self, id: &Uuid, project: NewProject) -> Result<Project> {
        project.validate()?;

        let mut projects = self.projects.write().map_err(poisoned)?;
        let existing = projects
            .get(id)
            .ok_or_else(|| StoryreelError::ProjectNotFound(id.to_string()))?;
        let project = project.into_project(existing.id, existing.created_at);

        projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut projects = self.projects.write().map_err(poisoned)?;
        Ok(projects.remove(id).is_some())
    }
}
