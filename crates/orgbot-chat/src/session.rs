//! Chat session manager: one organization, one turn log, one query in flight.
//!
//! A submission is a two-phase transition. The user turn is appended and the
//! session marked pending before the query boundary is awaited; the answer
//! (or a synthesized error turn) is then appended and the pending flag
//! cleared in a single commit.

use std::sync::{Arc, Mutex, MutexGuard};

use orgbot_core::config::ChatConfig;
use orgbot_core::OrganizationId;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::boundary::QueryBoundary;
use crate::error::Rejection;
use crate::events::SessionEvent;
use crate::types::{Session, SubmitOutcome, Turn};

/// Capacity of the per-session event channel.
const EVENT_CAPACITY: usize = 64;

/// Owns the turn log of one organization's conversation and mediates its
/// queries against a [`QueryBoundary`].
pub struct SessionManager {
    organization_id: Option<OrganizationId>,
    boundary: Arc<dyn QueryBoundary>,
    state: Mutex<Session>,
    events: broadcast::Sender<SessionEvent>,
    cancel: CancellationToken,
    error_prefix: String,
}

impl SessionManager {
    /// Open a session for `organization_id`, seeded with the greeting turn.
    ///
    /// A blank identifier yields a session that shows the greeting but turns
    /// every submission away with [`Rejection::NoOrganization`].
    pub fn initialize(
        organization_id: &str,
        boundary: Arc<dyn QueryBoundary>,
        config: &ChatConfig,
    ) -> Self {
        let organization_id = OrganizationId::parse(organization_id);
        match &organization_id {
            Some(id) => tracing::info!(organization_id = %id, "Chat session opened"),
            None => tracing::debug!("Chat session opened without an organization"),
        }

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(Session {
                organization_id: organization_id.clone(),
                turns: vec![Turn::assistant(config.greeting.clone())],
                pending: false,
            }),
            organization_id,
            boundary,
            events,
            cancel: CancellationToken::new(),
            error_prefix: config.error_prefix.clone(),
        }
    }

    /// Send `text` to the assistant.
    ///
    /// Blank input, a session without organization, a closed session and a
    /// session with a query already in flight are all turned away without
    /// touching the log. Otherwise exactly one user turn and, unless the
    /// session is closed meanwhile, exactly one assistant turn are appended.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let Some(organization_id) = self.organization_id.as_ref() else {
            return reject(Rejection::NoOrganization);
        };
        let query = text.trim();
        if query.is_empty() {
            return reject(Rejection::EmptyInput);
        }
        if self.cancel.is_cancelled() {
            return reject(Rejection::Closed);
        }

        // Phase one: optimistic user turn.
        let user_turn = Turn::user(query);
        {
            let mut session = self.lock();
            if session.pending {
                return reject(Rejection::Pending);
            }
            session.turns.push(user_turn.clone());
            session.pending = true;
            self.emit(SessionEvent::TurnAppended(user_turn));
            self.emit(SessionEvent::PendingChanged(true));
        }
        let guard = PendingGuard {
            manager: self,
            armed: true,
        };

        tracing::debug!(organization_id = %organization_id, len = query.len(), "Query sent");
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            result = self.boundary.query(organization_id, query) => Some(result),
        };
        let Some(result) = result.filter(|_| !self.cancel.is_cancelled()) else {
            tracing::info!(organization_id = %organization_id, "Session closed; query result dropped");
            drop(guard);
            return SubmitOutcome::Cancelled;
        };

        // Phase two: one closing assistant turn, whichever branch fired.
        let outcome = match result {
            Ok(answer) => SubmitOutcome::Answered(Turn::assistant(answer)),
            Err(error) => {
                tracing::warn!(organization_id = %organization_id, error = %error, "Query failed");
                SubmitOutcome::Failed {
                    turn: Turn::assistant(format!("{}: {}", self.error_prefix, error)),
                    error,
                }
            }
        };
        if let Some(turn) = outcome.turn() {
            guard.commit(turn.clone());
        }
        outcome
    }

    /// Tear the session down.
    ///
    /// An in-flight query is abandoned and its result dropped; later
    /// submissions are rejected with [`Rejection::Closed`].
    pub fn close(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        tracing::info!(
            organization_id = ?self.organization_id.as_ref().map(|id| id.as_str()),
            "Chat session closed"
        );
        self.emit(SessionEvent::Closed);
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Receive every change committed to this session from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn organization_id(&self) -> Option<&OrganizationId> {
        self.organization_id.as_ref()
    }

    /// Snapshot of the whole session.
    pub fn session(&self) -> Session {
        self.lock().clone()
    }

    /// Snapshot of the turn log in append order.
    pub fn turns(&self) -> Vec<Turn> {
        self.lock().turns.clone()
    }

    /// The newest turn; the one a view keeps in sight.
    pub fn last_turn(&self) -> Option<Turn> {
        self.lock().turns.last().cloned()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().pending
    }

    // -- Private helpers --

    fn lock(&self) -> MutexGuard<'_, Session> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("Session lock poisoned; recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Broadcast `event`. Callers hold the session lock so subscribers see
    /// events in the same order as the log.
    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

fn reject(reason: Rejection) -> SubmitOutcome {
    tracing::debug!(reason = %reason, "Submission rejected");
    SubmitOutcome::Rejected(reason)
}

/// Clears the pending flag if the query never reaches its commit, so a
/// dropped or cancelled submission cannot leave the session stuck.
struct PendingGuard<'a> {
    manager: &'a SessionManager,
    armed: bool,
}

impl PendingGuard<'_> {
    fn commit(mut self, turn: Turn) {
        let mut session = self.manager.lock();
        session.turns.push(turn.clone());
        session.pending = false;
        self.manager.emit(SessionEvent::TurnAppended(turn));
        self.manager.emit(SessionEvent::PendingChanged(false));
        drop(session);
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut session = self.manager.lock();
            session.pending = false;
            self.manager.emit(SessionEvent::PendingChanged(false));
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
