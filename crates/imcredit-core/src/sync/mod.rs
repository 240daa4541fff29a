//! Keeping a client's view of a project fresh
//!
//! Collaborators edit the same project concurrently, so clients re-fetch the
//! full author list on a fixed interval and re-render. Polling pauses while
//! the client is hidden and resumes with an immediate refresh.

mod poller;
mod session;

pub use poller::{AuthorSource, PollHandle, Poller};
pub use session::ProjectSession;
