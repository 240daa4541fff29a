//! CRediT statement rendering

use crate::domain::Author;

fn roles_sentence(author: &Author) -> String {
    author.role_names().join(", ")
}

/// `Name: Role, Role.` per author, joined with a single space
pub fn render_credit_statement(authors: &[Author]) -> String {
    authors
        .iter()
        .map(|author| format!("{}: {}.", author.display_name(), roles_sentence(author)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Same statement as HTML with each name in bold
pub fn render_credit_statement_html(authors: &[Author]) -> String {
    authors
        .iter()
        .map(|author| {
            format!(
                "<b>{}</b>: {}.",
                escape_html(&author.display_name()),
                escape_html(&roles_sentence(author))
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for inclusion in HTML element content
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreditRole;
    use uuid::Uuid;

    fn author(first: &str, last: &str, roles: &[CreditRole]) -> Author {
        Author {
            id: Uuid::new_v4(),
            project_id: Uuid::nil(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            middle_initial: None,
            affiliations: Vec::new(),
            roles: roles.to_vec(),
            orcid: None,
            equal_contribution: None,
            author_order: 0,
        }
    }

    #[test]
    fn statement_sentences() {
        let authors = vec![
            author("Alice", "", &[CreditRole::Software, CreditRole::Validation]),
            author("Bob", "", &[CreditRole::Conceptualization]),
        ];
        assert_eq!(
            render_credit_statement(&authors),
            "Alice: Software, Validation. Bob: Conceptualization."
        );
    }

    #[test]
    fn html_bolds_and_escapes() {
        let mut ada = author("Ada", "Lovelace", &[CreditRole::WritingReviewEditing]);
        ada.middle_initial = Some("<K>".into());
        assert_eq!(
            render_credit_statement_html(&[ada]),
            "<b>Ada &lt;K&gt; Lovelace</b>: Writing \u{2013} review &amp; editing."
        );
    }

    #[test]
    fn empty_author_list() {
        assert_eq!(render_credit_statement(&[]), "");
        assert_eq!(render_credit_statement_html(&[]), "");
    }
}
