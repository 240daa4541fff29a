//! Author line with numbered affiliation footnotes
//!
//! Affiliations are numbered by first appearance: authors are scanned in
//! display order and each author's affiliations in stored order. Two
//! affiliations are the same footnote iff their formatted strings match.
//!
//! ```text
//! Alice Smith¹·², Bob Jones², Carol White
//!
//! ¹ MIT, Cambridge, MA 02139, United States
//! ² Harvard University
//! ```

use std::collections::HashMap;

use super::superscript::{to_superscript, MARK_SEPARATOR};
use crate::domain::Author;

/// Distinct formatted affiliations and their 1-based footnote numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffiliationIndex {
    numbers: HashMap<String, usize>,
    ordered: Vec<String>,
}

impl AffiliationIndex {
    /// Number every non-empty affiliation across `authors`
    pub fn build(authors: &[Author]) -> Self {
        let mut index = Self::default();
        for author in authors {
            for entry in &author.affiliations {
                index.insert(entry.format());
            }
        }
        index
    }

    /// Register a formatted affiliation, returning its number.
    ///
    /// Empty strings are never numbered.
    pub fn insert(&mut self, formatted: String) -> Option<usize> {
        if formatted.is_empty() {
            return None;
        }
        if let Some(&number) = self.numbers.get(&formatted) {
            return Some(number);
        }
        let number = self.ordered.len() + 1;
        self.numbers.insert(formatted.clone(), number);
        self.ordered.push(formatted);
        Some(number)
    }

    pub fn number_of(&self, formatted: &str) -> Option<usize> {
        self.numbers.get(formatted).copied()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// `(number, formatted)` pairs in increasing number order
    pub fn footnotes(&self) -> impl Iterator<Item = (usize, &str)> {
        self.ordered
            .iter()
            .enumerate()
            .map(|(i, formatted)| (i + 1, formatted.as_str()))
    }

    /// Footnote numbers for one author: distinct, in the author's own order
    pub fn marks_for(&self, author: &Author) -> Vec<usize> {
        let mut marks = Vec::with_capacity(author.affiliations.len());
        for entry in &author.affiliations {
            if let Some(number) = self.number_of(&entry.format()) {
                if !marks.contains(&number) {
                    marks.push(number);
                }
            }
        }
        marks
    }
}

/// `DisplayName` followed by superscript marks joined with `·`
pub fn render_author(author: &Author, index: &AffiliationIndex) -> String {
    let mut rendered = author.display_name();
    let marks = index.marks_for(author);
    let sep = MARK_SEPARATOR.to_string();
    rendered.push_str(
        &marks
            .into_iter()
            .map(to_superscript)
            .collect::<Vec<_>>()
            .join(&sep),
    );
    rendered
}

/// The author line alone, authors joined with `", "`
pub fn render_author_line(authors: &[Author], index: &AffiliationIndex) -> String {
    authors
        .iter()
        .map(|author| render_author(author, index))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Author line, a blank line, then one footnote per distinct affiliation.
///
/// Without affiliations the author line stands alone; with no authors the
/// result is empty.
pub fn render_author_list(authors: &[Author]) -> String {
    let index = AffiliationIndex::build(authors);
    let mut output = render_author_line(authors, &index);
    if !index.is_empty() {
        output.push('\n');
        for (number, formatted) in index.footnotes() {
            output.push('\n');
            output.push_str(&to_superscript(number));
            output.push(' ');
            output.push_str(formatted);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Affiliation, AffiliationEntry, CreditRole};
    use uuid::Uuid;

    fn author(name: &str, affiliations: &[&str]) -> Author {
        Author {
            id: Uuid::new_v4(),
            project_id: Uuid::nil(),
            first_name: name.to_string(),
            last_name: String::new(),
            middle_initial: None,
            affiliations: affiliations
                .iter()
                .map(|a| AffiliationEntry::Structured(Affiliation::new(*a)))
                .collect(),
            roles: vec![CreditRole::Investigation],
            orcid: None,
            equal_contribution: None,
            author_order: 0,
        }
    }

    #[test]
    fn shared_affiliation_gets_one_footnote() {
        let authors = vec![author("Alice", &["MIT"]), author("Bob", &["MIT"]), author("Carol", &[])];
        assert_eq!(
            render_author_list(&authors),
            "Alice\u{00B9}, Bob\u{00B9}, Carol\n\n\u{00B9} MIT"
        );
    }

    #[test]
    fn numbering_follows_first_appearance() {
        let authors = vec![author("A1", &["X", "Y"]), author("A2", &["Y", "X"])];
        let index = AffiliationIndex::build(&authors);
        assert_eq!(index.number_of("X"), Some(1));
        assert_eq!(index.number_of("Y"), Some(2));
        assert_eq!(render_author(&authors[0], &index), "A1\u{00B9}\u{00B7}\u{00B2}");
        assert_eq!(render_author(&authors[1], &index), "A2\u{00B2}\u{00B7}\u{00B9}");
    }

    #[test]
    fn no_affiliations_means_no_footnotes() {
        let authors = vec![author("Alice", &[]), author("Bob", &[])];
        assert_eq!(render_author_list(&authors), "Alice, Bob");
    }

    #[test]
    fn empty_project_renders_nothing() {
        assert_eq!(render_author_list(&[]), "");
    }

    #[test]
    fn blank_affiliations_are_not_numbered() {
        let mut alice = author("Alice", &["MIT"]);
        alice
            .affiliations
            .insert(0, AffiliationEntry::Structured(Affiliation::default()));
        let index = AffiliationIndex::build(&[alice.clone()]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.marks_for(&alice), vec![1]);
    }

    #[test]
    fn repeated_affiliation_on_one_author_is_marked_once() {
        let alice = author("Alice", &["MIT", "MIT"]);
        let index = AffiliationIndex::build(&[alice.clone()]);
        assert_eq!(render_author(&alice, &index), "Alice\u{00B9}");
    }

    #[test]
    fn double_digit_marks() {
        let names: Vec<String> = (1..=12).map(|i| format!("Lab {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let prolific = author("Pat", &refs);
        let index = AffiliationIndex::build(&[prolific.clone()]);
        assert!(render_author(&prolific, &index).ends_with("\u{00B7}\u{00B9}\u{00B2}"));
        let list = render_author_list(&[prolific]);
        assert!(list.ends_with("\n\u{00B9}\u{00B2} Lab 12"));
    }
}
