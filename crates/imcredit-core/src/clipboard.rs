//! Copying rendered output to a clipboard
//!
//! The CRediT statement is offered as rich HTML (names in bold) with a
//! plain-text alternative. Targets that cannot take rich content get the
//! plain text only.

use thiserror::Error;

use crate::domain::Author;
use crate::render::{render_author_list, render_credit_statement, render_credit_statement_html};

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Rich text not supported by this clipboard")]
    RichTextUnsupported,

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// A destination for copied text
pub trait ClipboardTarget {
    /// Write HTML together with its plain-text alternative
    fn write_rich(&mut self, html: &str, plain: &str) -> Result<(), ClipboardError>;

    fn write_text(&mut self, plain: &str) -> Result<(), ClipboardError>;
}

/// How the statement ended up on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyFormat {
    Rich,
    PlainText,
}

/// Copy the CRediT statement, falling back to plain text when the rich
/// write fails.
pub fn copy_credit_statement<T: ClipboardTarget + ?Sized>(
    target: &mut T,
    authors: &[Author],
) -> Result<CopyFormat, ClipboardError> {
    let plain = render_credit_statement(authors);
    let html = render_credit_statement_html(authors);

    match target.write_rich(&html, &plain) {
        Ok(()) => Ok(CopyFormat::Rich),
        Err(e) => {
            tracing::warn!(error = %e, "rich copy failed, falling back to plain text");
            target.write_text(&plain)?;
            Ok(CopyFormat::PlainText)
        }
    }
}

/// Copy the author list with its footnotes as plain text
pub fn copy_author_list<T: ClipboardTarget + ?Sized>(
    target: &mut T,
    authors: &[Author],
) -> Result<(), ClipboardError> {
    target.write_text(&render_author_list(authors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorFields, CreditRole};
    use uuid::Uuid;

    #[derive(Default)]
    struct Recorder {
        rich_supported: bool,
        html: Option<String>,
        text: Option<String>,
    }

    impl ClipboardTarget for Recorder {
        fn write_rich(&mut self, html: &str, plain: &str) -> Result<(), ClipboardError> {
            if !self.rich_supported {
                return Err(ClipboardError::RichTextUnsupported);
            }
            self.html = Some(html.to_string());
            self.text = Some(plain.to_string());
            Ok(())
        }

        fn write_text(&mut self, plain: &str) -> Result<(), ClipboardError> {
            self.text = Some(plain.to_string());
            Ok(())
        }
    }

    fn authors() -> Vec<Author> {
        vec![AuthorFields::new("Ada", "Lovelace")
            .with_role(CreditRole::Software)
            .validate()
            .unwrap()
            .into_author(Uuid::new_v4(), Uuid::nil(), 0)]
    }

    #[test]
    fn rich_copy() {
        let mut target = Recorder {
            rich_supported: true,
            ..Default::default()
        };
        let format = copy_credit_statement(&mut target, &authors()).unwrap();
        assert_eq!(format, CopyFormat::Rich);
        assert_eq!(target.html.as_deref(), Some("<b>Ada Lovelace</b>: Software."));
        assert_eq!(target.text.as_deref(), Some("Ada Lovelace: Software."));
    }

    #[test]
    fn falls_back_to_plain_text() {
        let mut target = Recorder::default();
        let format = copy_credit_statement(&mut target, &authors()).unwrap();
        assert_eq!(format, CopyFormat::PlainText);
        assert!(target.html.is_none());
        assert_eq!(target.text.as_deref(), Some("Ada Lovelace: Software."));
    }

    #[test]
    fn author_list_is_plain() {
        let mut target = Recorder::default();
        copy_author_list(&mut target, &authors()).unwrap();
        assert_eq!(target.text.as_deref(), Some("Ada Lovelace"));
    }
}
