//! Projects (one manuscript's author list)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to projects created without one
pub const DEFAULT_PROJECT_TITLE: &str = "Untitled Project";

/// A manuscript whose author list is being assembled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(title: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: project_title(title),
            created_at: Utc::now(),
        }
    }
}

/// Identity of a newly created project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: Uuid,
    pub title: String,
}

impl From<&Project> for ProjectRef {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
        }
    }
}

/// Project listing row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub author_count: u32,
}

/// Trimmed title, or the default when blank
pub fn project_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_PROJECT_TITLE.to_string(),
    }
}
