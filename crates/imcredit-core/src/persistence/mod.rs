//! Persistence layer
//!
//! Provides SQLite-backed storage for projects and authors.

mod schema;
mod sqlite_store;

pub use schema::Schema;
pub use sqlite_store::SqliteAuthorStore;
