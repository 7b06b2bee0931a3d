use serde::Serialize;

use crate::types::Turn;

/// Changes a chat session broadcasts to its view.
///
/// Emitted after the state change is committed, so a subscriber that reads
/// the session on receipt sees the change.
#[derive(Clone, Debug, Serialize)]
#[non_exhaustive]
pub enum SessionEvent {
    /// A turn was appended at the end of the log.
    TurnAppended(Turn),
    /// The in-flight flag flipped.
    PendingChanged(bool),
    /// The session was torn down.
    Closed,
}
