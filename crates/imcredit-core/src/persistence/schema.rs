//! SQLite schema for projects and authors

/// SQLite schema definition
pub struct Schema;

impl Schema {
    /// Get the complete schema SQL
    pub fn create_tables() -> &'static str {
        r#"
PRAGMA foreign_keys = ON;

-- Projects; author_order_high_water is the largest order ever assigned
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    created_at TEXT NOT NULL,
    author_order_high_water INTEGER
);

CREATE INDEX IF NOT EXISTS idx_projects_created ON projects(created_at DESC);

-- Authors; affiliations and roles are JSON arrays
CREATE TABLE IF NOT EXISTS authors (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    middle_initial TEXT NOT NULL DEFAULT '',
    affiliations TEXT NOT NULL DEFAULT '[]',
    roles TEXT NOT NULL,
    orcid TEXT NOT NULL DEFAULT '',
    equal_contribution TEXT NOT NULL DEFAULT '',
    author_order INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_authors_project_order ON authors(project_id, author_order);
"#
    }
}
