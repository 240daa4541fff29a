//! Client-side view model for one open project

use uuid::Uuid;

use crate::domain::Author;
use crate::order::{plan_swap, Direction, OrderSlot};
use crate::render::RenderedOutput;

/// The latest author snapshot of a project and the text rendered from it.
///
/// Every [`apply`](ProjectSession::apply) re-renders from scratch; nothing
/// from the previous snapshot is reused.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSession {
    project_id: Uuid,
    authors: Vec<Author>,
    output: RenderedOutput,
}

impl ProjectSession {
    pub fn new(project_id: Uuid) -> Self {
        Self {
            project_id,
            authors: Vec::new(),
            output: RenderedOutput::default(),
        }
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn output(&self) -> &RenderedOutput {
        &self.output
    }

    /// Replace the snapshot and recompute both outputs.
    pub fn apply(&mut self, mut authors: Vec<Author>) {
        authors.sort_by_key(|author| author.author_order);
        self.output = RenderedOutput::from_authors(&authors);
        self.authors = authors;
    }

    /// Whether a move button for this author should be enabled
    pub fn can_move(&self, author_id: Uuid, direction: Direction) -> bool {
        let slots: Vec<OrderSlot> = self
            .authors
            .iter()
            .map(|author| OrderSlot::new(author.id, author.author_order))
            .collect();
        plan_swap(&slots, author_id, direction).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Affiliation, AuthorFields, CreditRole};

    fn author(project_id: Uuid, first: &str, order: i64) -> Author {
        AuthorFields::new(first, "Doe")
            .with_role(CreditRole::Methodology)
            .with_affiliation(Affiliation::new("CERN"))
            .validate()
            .unwrap()
            .into_author(Uuid::new_v4(), project_id, order)
    }

    #[test]
    fn apply_sorts_and_renders() {
        let project_id = Uuid::new_v4();
        let mut session = ProjectSession::new(project_id);
        session.apply(vec![author(project_id, "Zed", 5), author(project_id, "Amy", 2)]);

        assert_eq!(session.authors()[0].first_name, "Amy");
        assert_eq!(
            session.output().author_list,
            "Amy Doe\u{00B9}, Zed Doe\u{00B9}\n\n\u{00B9} CERN"
        );
        assert_eq!(
            session.output().credit_statement,
            "Amy Doe: Methodology. Zed Doe: Methodology."
        );
    }

    #[test]
    fn move_buttons_disabled_at_ends() {
        let project_id = Uuid::new_v4();
        let mut session = ProjectSession::new(project_id);
        session.apply(vec![author(project_id, "A", 0), author(project_id, "B", 1)]);
        let first = session.authors()[0].id;
        let last = session.authors()[1].id;

        assert!(!session.can_move(first, Direction::Up));
        assert!(session.can_move(first, Direction::Down));
        assert!(session.can_move(last, Direction::Up));
        assert!(!session.can_move(last, Direction::Down));
    }

    #[test]
    fn empty_session_renders_nothing() {
        let session = ProjectSession::new(Uuid::new_v4());
        assert_eq!(session.output(), &RenderedOutput::default());
    }
}
