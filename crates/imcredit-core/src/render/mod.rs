//! Text outputs recomputed from an author snapshot
//!
//! Everything here is pure: the same authors always render the same text.

pub mod credit;
pub mod footnotes;
pub mod superscript;

use serde::{Deserialize, Serialize};

use crate::domain::Author;

pub use credit::{escape_html, render_credit_statement, render_credit_statement_html};
pub use footnotes::{render_author, render_author_line, render_author_list, AffiliationIndex};
pub use superscript::to_superscript;

/// Both copy/paste outputs for one snapshot of a project's authors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedOutput {
    pub author_list: String,
    pub credit_statement: String,
    pub credit_statement_html: String,
}

impl RenderedOutput {
    /// Render from authors already in display order
    pub fn from_authors(authors: &[Author]) -> Self {
        Self {
            author_list: render_author_list(authors),
            credit_statement: render_credit_statement(authors),
            credit_statement_html: render_credit_statement_html(authors),
        }
    }
}
