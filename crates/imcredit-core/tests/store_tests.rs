//! Integration tests for the SQLite author store
//!
//! Exercises a file-backed database end to end, including reopening it and
//! driving a poller from it.

use std::sync::Arc;
use std::time::Duration;

use imcredit_core::domain::{Affiliation, AuthorFields, CreditRole, EqualContribution};
use imcredit_core::{AuthorStore, CreditError, Direction, Poller, SqliteAuthorStore};
use tempfile::TempDir;

fn fields(first: &str, last: &str) -> AuthorFields {
    AuthorFields::new(first, last).with_role(CreditRole::Investigation)
}

fn names(store: &SqliteAuthorStore, project_id: uuid::Uuid) -> Vec<String> {
    store
        .list_authors(project_id)
        .unwrap()
        .into_iter()
        .map(|a| a.first_name)
        .collect()
}

#[test]
fn test_database_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("imcredit.db");

    let project_id = {
        let store = SqliteAuthorStore::open(&path).unwrap();
        let project = store.create_project(Some("Survey of Dwarf Galaxies")).unwrap();
        store
            .create_author(
                project.id,
                fields("Vera", "Rubin")
                    .with_affiliation(Affiliation::new("Carnegie Institution").with_country("usa"))
                    .with_orcid("0000-0001-2345-6789")
                    .with_equal_contribution(EqualContribution::First)
                    .validate()
                    .unwrap(),
            )
            .unwrap();
        project.id
    };

    let store = SqliteAuthorStore::open(&path).unwrap();
    let project = store.get_project(project_id).unwrap();
    assert_eq!(project.title, "Survey of Dwarf Galaxies");

    let authors = store.list_authors(project_id).unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(
        authors[0].affiliations[0].format(),
        "Carnegie Institution, United States"
    );
    assert_eq!(authors[0].orcid.as_deref(), Some("0000-0001-2345-6789"));
    assert_eq!(authors[0].equal_contribution, Some(EqualContribution::First));
}

#[test]
fn test_delete_does_not_renumber() {
    let store = SqliteAuthorStore::open_in_memory().unwrap();
    let project = store.create_project(None).unwrap();
    let mut ids = Vec::new();
    for name in ["A", "B", "C", "D"] {
        ids.push(
            store
                .create_author(project.id, fields(name, "X").validate().unwrap())
                .unwrap(),
        );
    }

    store.delete_author(project.id, ids[1].id).unwrap();
    let remaining = store.list_authors(project.id).unwrap();
    let orders: Vec<i64> = remaining.iter().map(|a| a.author_order).collect();
    assert_eq!(
        orders,
        vec![ids[0].author_order, ids[2].author_order, ids[3].author_order]
    );

    assert!(matches!(
        store.delete_author(project.id, ids[1].id),
        Err(CreditError::NotFound(_))
    ));
}

#[test]
fn test_reorder_across_gap() {
    let store = SqliteAuthorStore::open_in_memory().unwrap();
    let project = store.create_project(None).unwrap();
    let mut created = Vec::new();
    for name in ["A", "B", "C"] {
        created.push(
            store
                .create_author(project.id, fields(name, "X").validate().unwrap())
                .unwrap(),
        );
    }
    store.delete_author(project.id, created[1].id).unwrap();

    store
        .swap_author_order(project.id, created[2].id, Direction::Up)
        .unwrap();
    assert_eq!(names(&store, project.id), vec!["C", "A"]);

    let err = store
        .swap_author_order(project.id, created[2].id, Direction::Up)
        .unwrap_err();
    assert_eq!(err.to_string(), "Cannot move further");
    assert_eq!(names(&store, project.id), vec!["C", "A"]);
}

#[test]
fn test_author_from_other_project_is_not_found() {
    let store = SqliteAuthorStore::open_in_memory().unwrap();
    let mine = store.create_project(Some("Mine")).unwrap();
    let theirs = store.create_project(Some("Theirs")).unwrap();
    let author = store
        .create_author(theirs.id, fields("Eve", "X").validate().unwrap())
        .unwrap();

    assert!(store
        .update_author(mine.id, author.id, fields("Mallory", "X").validate().unwrap())
        .is_err());
    assert!(store
        .swap_author_order(mine.id, author.id, Direction::Down)
        .is_err());
    assert_eq!(names(&store, theirs.id), vec!["Eve"]);
}

#[tokio::test(start_paused = true)]
async fn test_poller_sees_store_changes() {
    let store = Arc::new(SqliteAuthorStore::open_in_memory().unwrap());
    let project = store.create_project(None).unwrap();
    store
        .create_author(project.id, fields("Alice", "Smith").validate().unwrap())
        .unwrap();

    let handle = Poller::new(store.clone(), project.id, Duration::from_secs(5)).spawn();
    let mut rx = handle.subscribe();
    rx.changed().await.unwrap();
    assert_eq!(
        rx.borrow_and_update().output().author_list,
        "Alice Smith"
    );

    store
        .create_author(project.id, fields("Bob", "Jones").validate().unwrap())
        .unwrap();
    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(
        handle.session().output().credit_statement,
        "Alice Smith: Investigation. Bob Jones: Investigation."
    );
}
