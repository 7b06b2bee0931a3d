//! Query boundary consumed by chat sessions.

use async_trait::async_trait;
use orgbot_core::{OrganizationId, TransportError};

/// Remote endpoint that answers free-text queries on behalf of an organization.
#[async_trait]
pub trait QueryBoundary: Send + Sync {
    /// Ask `query` of the assistant bound to `organization_id`.
    ///
    /// Returns the answer text, or a [`TransportError`] for unreachable
    /// services, non-success statuses and unreadable responses alike.
    async fn query(
        &self,
        organization_id: &OrganizationId,
        query: &str,
    ) -> Result<String, TransportError>;
}
