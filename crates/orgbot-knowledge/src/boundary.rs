//! Organization creation boundary.

use async_trait::async_trait;
use orgbot_core::TransportError;

use crate::types::Submission;

/// Remote endpoint that creates an organization from a finalized submission.
#[async_trait]
pub trait CreationBoundary: Send + Sync {
    /// Hand `submission` to the service. Any successful reply counts as created.
    async fn create_organization(&self, submission: &Submission) -> Result<(), TransportError>;
}
