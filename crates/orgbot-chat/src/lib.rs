//! Conversation sessions for orgbot.
//!
//! Keeps the ordered turn log of one organization's chat, issues one query
//! at a time against the remote service and folds answers and failures back
//! into the log.

pub mod boundary;
pub mod error;
pub mod events;
pub mod session;
pub mod types;

pub use boundary::QueryBoundary;
pub use error::Rejection;
pub use events::SessionEvent;
pub use session::SessionManager;
pub use types::{Session, Speaker, SubmitOutcome, Turn};
