//! Storage abstraction for projects and their authors

use uuid::Uuid;

use crate::domain::{Author, Project, ProjectSummary, ValidatedAuthor};
use crate::error::Result;
use crate::order::Direction;

/// The trait that all storage backends implement.
///
/// Each call is independent and atomic. Author fields arrive already
/// validated, so a backend never sees an author without a name or roles.
pub trait AuthorStore: Send + Sync {
    /// Create a project; a blank title becomes "Untitled Project".
    fn create_project(&self, title: Option<&str>) -> Result<Project>;

    fn get_project(&self, id: Uuid) -> Result<Project>;

    /// All projects with their author counts, newest first.
    fn list_projects(&self) -> Result<Vec<ProjectSummary>>;

    /// Authors of a project in ascending `author_order`.
    fn list_authors(&self, project_id: Uuid) -> Result<Vec<Author>>;

    /// Add an author after every order value the project has handed out.
    fn create_author(&self, project_id: Uuid, author: ValidatedAuthor) -> Result<Author>;

    /// Replace an author's editable fields. The order value is untouched.
    fn update_author(
        &self,
        project_id: Uuid,
        author_id: Uuid,
        author: ValidatedAuthor,
    ) -> Result<Author>;

    fn delete_author(&self, project_id: Uuid, author_id: Uuid) -> Result<()>;

    /// Swap an author's order value with its neighbour. Both rows change or
    /// neither does.
    fn swap_author_order(&self, project_id: Uuid, author_id: Uuid, direction: Direction)
        -> Result<()>;
}
