//! Background polling of a project's author list

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use uuid::Uuid;

use super::session::ProjectSession;
use crate::domain::Author;
use crate::error::Result;
use crate::store::AuthorStore;

/// Anything that can produce the current author list of a project.
pub trait AuthorSource: Send + Sync + 'static {
    fn fetch_authors(&self, project_id: Uuid) -> impl Future<Output = Result<Vec<Author>>> + Send;
}

/// In-process stores answer synchronously.
impl<S: AuthorStore + 'static> AuthorSource for S {
    fn fetch_authors(&self, project_id: Uuid) -> impl Future<Output = Result<Vec<Author>>> + Send {
        std::future::ready(self.list_authors(project_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Visible,
    Hidden,
}

/// Periodically re-fetches one project's authors into a [`ProjectSession`].
pub struct Poller<S> {
    source: Arc<S>,
    project_id: Uuid,
    interval: Duration,
}

impl<S: AuthorSource> Poller<S> {
    pub fn new(source: Arc<S>, project_id: Uuid, interval: Duration) -> Self {
        Self {
            source,
            project_id,
            interval,
        }
    }

    /// Start polling on the current tokio runtime.
    ///
    /// The first fetch happens immediately; later ones every `interval`
    /// while visible. Dropping the handle stops the task.
    pub fn spawn(self) -> PollHandle {
        let (session_tx, session_rx) = watch::channel(ProjectSession::new(self.project_id));
        let (visibility_tx, visibility_rx) = watch::channel(Visibility::Visible);
        let refresh = Arc::new(Notify::new());

        let task = tokio::spawn(self.run(session_tx, visibility_rx, refresh.clone()));

        PollHandle {
            session: session_rx,
            visibility: visibility_tx,
            refresh,
            task,
        }
    }

    async fn run(
        self,
        session_tx: watch::Sender<ProjectSession>,
        mut visibility: watch::Receiver<Visibility>,
        refresh: Arc<Notify>,
    ) {
        let period = self.interval.max(Duration::from_millis(1));
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(project_id = %self.project_id, ?period, "polling started");
        self.refresh(&session_tx).await;

        loop {
            let visible = *visibility.borrow() == Visibility::Visible;
            tokio::select! {
                _ = ticker.tick(), if visible => {
                    self.refresh(&session_tx).await;
                }
                _ = refresh.notified() => {
                    self.refresh(&session_tx).await;
                    ticker.reset();
                }
                changed = visibility.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let now_visible = *visibility.borrow_and_update() == Visibility::Visible;
                    tracing::debug!(project_id = %self.project_id, visible = now_visible, "visibility changed");
                    if now_visible {
                        self.refresh(&session_tx).await;
                        ticker.reset();
                    }
                }
            }
        }
    }

    async fn refresh(&self, session_tx: &watch::Sender<ProjectSession>) {
        match self.source.fetch_authors(self.project_id).await {
            Ok(authors) => {
                session_tx.send_if_modified(|session| {
                    let mut sorted = authors;
                    sorted.sort_by_key(|author| author.author_order);
                    if session.authors() == sorted.as_slice() {
                        return false;
                    }
                    session.apply(sorted);
                    true
                });
            }
            Err(e) => {
                tracing::warn!(project_id = %self.project_id, error = %e, "failed to refresh authors");
            }
        }
    }
}

/// Control side of a running [`Poller`]
pub struct PollHandle {
    session: watch::Receiver<ProjectSession>,
    visibility: watch::Sender<Visibility>,
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Receiver that is notified whenever the author snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<ProjectSession> {
        self.session.clone()
    }

    /// The latest snapshot
    pub fn session(&self) -> ProjectSession {
        self.session.borrow().clone()
    }

    /// Pause polling while hidden; becoming visible refreshes at once.
    pub fn set_visible(&self, visible: bool) {
        let visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        self.visibility.send_if_modified(|current| {
            let changed = *current != visibility;
            *current = visibility;
            changed
        });
    }

    /// Fetch now instead of waiting for the next tick, e.g. after a local
    /// mutation.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }

    /// Stop polling. Dropping the handle does the same.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
