//! imcredit Core - Collaborative author lists and CRediT statements
//!
//! This crate provides the core functionality for assembling a manuscript's
//! author list:
//!
//! - **Domain**: Projects, authors, structured affiliations, and the 14 CRediT roles
//! - **Render**: Author line with numbered affiliation footnotes, plain and HTML CRediT statements
//! - **Order**: Adjacent-swap reordering with order values that are never reused
//! - **Store**: `AuthorStore` trait and a SQLite implementation
//! - **Sync**: Background polling that keeps a client's `ProjectSession` fresh
//! - **Clipboard**: Rich copy of the CRediT statement with a plain-text fallback
//! - **Client**: reqwest client for the HTTP API (`client` feature)
//! - **Config**: Server address, database path, and poll interval
//!
//! # Output
//!
//! ```text
//! Alice Smith¹·², Bob Jones², Carol White
//!
//! ¹ MIT, Cambridge, MA 02139, United States
//! ² Harvard University
//!
//! Alice Smith: Software, Validation. Bob Jones: Conceptualization.
//! ```

pub mod clipboard;
pub mod config;
pub mod domain;
pub mod error;
pub mod order;
pub mod render;
pub mod store;
pub mod sync;

#[cfg(feature = "sqlite")]
pub mod persistence;

#[cfg(feature = "client")]
pub mod client;

pub use clipboard::{
    copy_author_list, copy_credit_statement, ClipboardError, ClipboardTarget, CopyFormat,
};
pub use config::{ConfigError, CreditConfig, ServerConfig, SyncConfig};
pub use domain::{
    Affiliation, AffiliationEntry, Author, AuthorFields, CreditRole, EqualContribution, Project,
    ProjectRef, ProjectSummary, RoleInfo, ValidatedAuthor,
};
pub use error::{CreditError, Result};
pub use order::Direction;
pub use render::RenderedOutput;
pub use store::AuthorStore;
pub use sync::{AuthorSource, PollHandle, Poller, ProjectSession};

#[cfg(feature = "sqlite")]
pub use persistence::{Schema, SqliteAuthorStore};

#[cfg(feature = "client")]
pub use client::{ApiClient, ClientError};
