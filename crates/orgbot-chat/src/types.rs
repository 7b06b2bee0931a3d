//! Turn log types for chat sessions.

use chrono::{DateTime, Local};
use orgbot_core::{OrganizationId, TransportError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Rejection;

/// Who authored a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in a conversation. Never modified once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub speaker: Speaker,
    pub text: String,
    pub created_at: DateTime<Local>,
}

impl Turn {
    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker,
            text: text.into(),
            created_at: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, text)
    }
}

/// Turn history and in-flight state for one organization's conversation.
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    pub organization_id: Option<OrganizationId>,
    pub turns: Vec<Turn>,
    pub pending: bool,
}

/// Result of a single [`SessionManager::submit`](crate::SessionManager::submit) call.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The service answered; the assistant turn holds the answer.
    Answered(Turn),
    /// The query failed; the assistant turn holds the wrapped reason.
    Failed { turn: Turn, error: TransportError },
    /// Nothing was appended and no query was issued.
    Rejected(Rejection),
    /// The session was closed while the query was in flight; its result was dropped.
    Cancelled,
}

impl SubmitOutcome {
    /// The closing assistant turn, if one was appended.
    pub fn turn(&self) -> Option<&Turn> {
        match self {
            SubmitOutcome::Answered(turn) | SubmitOutcome::Failed { turn, .. } => Some(turn),
            SubmitOutcome::Rejected(_) | SubmitOutcome::Cancelled => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, SubmitOutcome::Rejected(_))
    }
}
