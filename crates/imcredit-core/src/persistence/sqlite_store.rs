use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use uuid::Uuid;

use super::schema::Schema;
use crate::domain::{
    project_title, AffiliationEntry, Author, CreditRole, EqualContribution, Project,
    ProjectSummary, ValidatedAuthor,
};
use crate::error::{CreditError, Result};
use crate::order::{next_author_order, plan_swap, Direction, OrderSlot};
use crate::store::AuthorStore;

const AUTHOR_COLUMNS: &str = "id, project_id, first_name, last_name, middle_initial, affiliations, roles, orcid, equal_contribution, author_order";

/// SQLite-backed implementation of the AuthorStore trait.
pub struct SqliteAuthorStore {
    conn: Mutex<Connection>,
}

impl SqliteAuthorStore {
    /// Open (or create) a database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| CreditError::Storage(format!("create {}: {}", parent.display(), e)))?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Self::init_with_connection(conn)
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::init_with_connection(Connection::open_in_memory()?)
    }

    fn init_with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(Schema::create_tables())?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| CreditError::Storage(format!("connection mutex poisoned: {}", e)))
    }

    /// Begin a write transaction that takes the database write lock up front.
    fn write_tx(conn: &Connection) -> Result<Transaction<'_>> {
        Ok(Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?)
    }

    fn ensure_project(conn: &Connection, project_id: Uuid) -> Result<()> {
        let exists = conn
            .query_row(
                "SELECT 1 FROM projects WHERE id = ?1",
                [project_id.to_string()],
                |_| Ok(()),
            )
            .optional()?;
        exists.ok_or_else(CreditError::project_not_found)
    }

    fn get_author(conn: &Connection, project_id: Uuid, author_id: Uuid) -> Result<Author> {
        conn.query_row(
            &format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = ?1 AND project_id = ?2"),
            params![author_id.to_string(), project_id.to_string()],
            row_to_author,
        )
        .optional()?
        .ok_or_else(CreditError::author_not_found)
    }

    fn order_slots(conn: &Connection, project_id: Uuid) -> Result<Vec<OrderSlot>> {
        let mut stmt = conn.prepare(
            "SELECT id, author_order FROM authors WHERE project_id = ?1 ORDER BY author_order ASC",
        )?;
        let slots = stmt
            .query_map([project_id.to_string()], |row| {
                Ok(OrderSlot::new(parse_uuid(row, 0)?, row.get(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(slots)
    }
}

impl AuthorStore for SqliteAuthorStore {
    fn create_project(&self, title: Option<&str>) -> Result<Project> {
        let project = Project {
            id: Uuid::new_v4(),
            title: project_title(title),
            // Stored with microsecond precision
            created_at: Utc::now().trunc_subsecs(6),
        };
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO projects (id, title, created_at) VALUES (?1, ?2, ?3)",
            params![
                project.id.to_string(),
                project.title,
                format_timestamp(&project.created_at),
            ],
        )?;
        tracing::info!(project_id = %project.id, "created project");
        Ok(project)
    }

    fn get_project(&self, id: Uuid) -> Result<Project> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, title, created_at FROM projects WHERE id = ?1",
            [id.to_string()],
            |row| {
                Ok(Project {
                    id: parse_uuid(row, 0)?,
                    title: row.get(1)?,
                    created_at: parse_timestamp(row, 2)?,
                })
            },
        )
        .optional()?
        .ok_or_else(CreditError::project_not_found)
    }

    fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT p.id, p.title, p.created_at, COUNT(a.id) AS author_count
            FROM projects p
            LEFT JOIN authors a ON a.project_id = p.id
            GROUP BY p.id
            ORDER BY p.created_at DESC
            "#,
        )?;
        let projects = stmt
            .query_map([], |row| {
                Ok(ProjectSummary {
                    id: parse_uuid(row, 0)?,
                    title: row.get(1)?,
                    created_at: parse_timestamp(row, 2)?,
                    author_count: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    fn list_authors(&self, project_id: Uuid) -> Result<Vec<Author>> {
        let conn = self.lock()?;
        Self::ensure_project(&conn, project_id)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE project_id = ?1 ORDER BY author_order ASC"
        ))?;
        let authors = stmt
            .query_map([project_id.to_string()], row_to_author)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(authors)
    }

    fn create_author(&self, project_id: Uuid, author: ValidatedAuthor) -> Result<Author> {
        let conn = self.lock()?;
        let tx = Self::write_tx(&conn)?;

        let high_water: Option<i64> = tx
            .query_row(
                "SELECT author_order_high_water FROM projects WHERE id = ?1",
                [project_id.to_string()],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(CreditError::project_not_found)?;
        let current_max: Option<i64> = tx.query_row(
            "SELECT MAX(author_order) FROM authors WHERE project_id = ?1",
            [project_id.to_string()],
            |row| row.get(0),
        )?;
        let order = next_author_order(current_max, high_water);

        let author = author.into_author(Uuid::new_v4(), project_id, order);
        tx.execute(
            &format!(
                "INSERT INTO authors ({AUTHOR_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ),
            params![
                author.id.to_string(),
                project_id.to_string(),
                author.first_name,
                author.last_name,
                author.middle_initial.as_deref().unwrap_or_default(),
                serde_json::to_string(&author.affiliations)?,
                serde_json::to_string(&author.roles)?,
                author.orcid.as_deref().unwrap_or_default(),
                author.equal_contribution.map(|e| e.as_str()).unwrap_or_default(),
                order,
            ],
        )?;
        tx.execute(
            "UPDATE projects SET author_order_high_water = ?1 WHERE id = ?2",
            params![order, project_id.to_string()],
        )?;
        tx.commit()?;

        tracing::info!(%project_id, author_id = %author.id, order, "added author");
        Ok(author)
    }

    fn update_author(
        &self,
        project_id: Uuid,
        author_id: Uuid,
        author: ValidatedAuthor,
    ) -> Result<Author> {
        let conn = self.lock()?;
        let changed = conn.execute(
            r#"
            UPDATE authors
            SET first_name = ?1, last_name = ?2, middle_initial = ?3, affiliations = ?4,
                roles = ?5, orcid = ?6, equal_contribution = ?7
            WHERE id = ?8 AND project_id = ?9
            "#,
            params![
                author.first_name,
                author.last_name,
                author.middle_initial.as_deref().unwrap_or_default(),
                serde_json::to_string(&author.affiliations)?,
                serde_json::to_string(&author.roles)?,
                author.orcid.as_deref().unwrap_or_default(),
                author.equal_contribution.map(|e| e.as_str()).unwrap_or_default(),
                author_id.to_string(),
                project_id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(CreditError::author_not_found());
        }
        tracing::info!(%project_id, %author_id, "updated author");
        Self::get_author(&conn, project_id, author_id)
    }

    fn delete_author(&self, project_id: Uuid, author_id: Uuid) -> Result<()> {
        let conn = self.lock()?;
        let deleted = conn.execute(
            "DELETE FROM authors WHERE id = ?1 AND project_id = ?2",
            params![author_id.to_string(), project_id.to_string()],
        )?;
        if deleted == 0 {
            return Err(CreditError::author_not_found());
        }
        tracing::info!(%project_id, %author_id, "deleted author");
        Ok(())
    }

    fn swap_author_order(
        &self,
        project_id: Uuid,
        author_id: Uuid,
        direction: Direction,
    ) -> Result<()> {
        let conn = self.lock()?;
        let tx = Self::write_tx(&conn)?;
        Self::ensure_project(&tx, project_id)?;

        let slots = Self::order_slots(&tx, project_id)?;
        // Dropping the transaction on a rejected plan rolls it back.
        let plan = plan_swap(&slots, author_id, direction)?;

        for slot in [plan.moved, plan.displaced] {
            tx.execute(
                "UPDATE authors SET author_order = ?1 WHERE id = ?2",
                params![slot.author_order, slot.author_id.to_string()],
            )?;
        }
        tx.commit()?;

        tracing::info!(
            %project_id,
            %author_id,
            direction = direction.offset(),
            "swapped author order"
        );
        Ok(())
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn parse_uuid(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::from_str(&text).map_err(|e| conversion_error(idx, e))
}

fn parse_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn parse_json<T: serde::de::DeserializeOwned>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text).map_err(|e| conversion_error(idx, e))
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn row_to_author(row: &rusqlite::Row) -> rusqlite::Result<Author> {
    let affiliations: Vec<AffiliationEntry> = parse_json(row, 5)?;
    let roles: Vec<CreditRole> = parse_json(row, 6)?;
    let equal_contribution: String = row.get(8)?;

    Ok(Author {
        id: parse_uuid(row, 0)?,
        project_id: parse_uuid(row, 1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        middle_initial: non_empty(row.get(4)?),
        affiliations,
        roles,
        orcid: non_empty(row.get(7)?),
        equal_contribution: EqualContribution::parse(&equal_contribution)
            .map_err(|e| conversion_error(8, e))?,
        author_order: row.get(9)?,
    })
}
