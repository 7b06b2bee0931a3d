//! Knowledge aggregator: builds an organization draft and validates it into
//! a single submission.
//!
//! Entry-level checks (both fields of an employee, product or service) run
//! when the entry is added. Mode-level checks run once, in [`KnowledgeAggregator::finalize`].

use crate::boundary::CreationBoundary;
use crate::error::{DraftRejection, EntryKind, OrgContextGap, PublishError, ValidationError};
use crate::types::{
    ChatbotInfo, DocumentRef, Employee, IngestionMode, Offering, OrganizationDraft,
    OrganizationPayload, OrganizationProfile, Submission,
};

/// Owns one [`OrganizationDraft`] from first keystroke to submission.
#[derive(Debug, Default)]
pub struct KnowledgeAggregator {
    draft: OrganizationDraft,
}

impl KnowledgeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &OrganizationDraft {
        &self.draft
    }

    /// Set chatbot name and description. Checked only at finalize.
    pub fn set_common_fields(&mut self, name: &str, description: &str) {
        self.draft.name = name.to_string();
        self.draft.description = description.to_string();
    }

    /// Switch the active payload branch. The other branch keeps its data.
    pub fn set_mode(&mut self, mode: IngestionMode) {
        if self.draft.mode != mode {
            tracing::debug!(from = ?self.draft.mode, to = ?mode, "Ingestion mode changed");
        }
        self.draft.mode = mode;
    }

    /// Attach the document for automatic mode. Only PDFs are accepted.
    pub fn attach_document(&mut self, document: DocumentRef) -> Result<(), DraftRejection> {
        if !document.is_pdf() {
            return Err(DraftRejection::UnsupportedDocument {
                content_type: document.content_type,
            });
        }
        tracing::debug!(file = %document.file_name, size = document.size_bytes, "Document attached");
        self.draft.document = Some(document);
        Ok(())
    }

    pub fn clear_document(&mut self) -> Option<DocumentRef> {
        self.draft.document.take()
    }

    /// Set the organization sub-record for manual mode.
    pub fn set_organization_profile(&mut self, profile: OrganizationProfile) {
        self.draft.profile = profile;
    }

    pub fn add_employee(&mut self, name: &str, role: &str) -> Result<(), DraftRejection> {
        let (name, role) = required_pair(EntryKind::Employee, name, role)?;
        self.draft.employees.push(Employee { name, role });
        Ok(())
    }

    pub fn add_product(&mut self, name: &str, details: &str) -> Result<(), DraftRejection> {
        let (name, details) = required_pair(EntryKind::Product, name, details)?;
        self.draft.products.push(Offering { name, details });
        Ok(())
    }

    pub fn add_service(&mut self, name: &str, details: &str) -> Result<(), DraftRejection> {
        let (name, details) = required_pair(EntryKind::Service, name, details)?;
        self.draft.services.push(Offering { name, details });
        Ok(())
    }

    /// Remove the employee at `index`; `None` when out of range.
    pub fn remove_employee(&mut self, index: usize) -> Option<Employee> {
        remove_at(&mut self.draft.employees, index)
    }

    pub fn remove_product(&mut self, index: usize) -> Option<Offering> {
        remove_at(&mut self.draft.products, index)
    }

    pub fn remove_service(&mut self, index: usize) -> Option<Offering> {
        remove_at(&mut self.draft.services, index)
    }

    /// Build the submission the current draft would produce, without
    /// touching the draft.
    pub fn validate(&self) -> Result<Submission, ValidationError> {
        let draft = &self.draft;
        let name = draft.name.trim();
        let description = draft.description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(ValidationError::MissingCommon);
        }
        let chatbot = ChatbotInfo {
            name: name.to_string(),
            description: description.to_string(),
        };

        match draft.mode {
            IngestionMode::Automatic => {
                let document = draft
                    .document
                    .clone()
                    .ok_or(ValidationError::MissingDocument)?;
                Ok(Submission::Automatic { chatbot, document })
            }
            IngestionMode::Manual => {
                if draft.profile.name.trim().is_empty() {
                    return Err(ValidationError::MissingOrgContext(
                        OrgContextGap::MissingName,
                    ));
                }
                if draft.products.is_empty() && draft.services.is_empty() {
                    return Err(ValidationError::MissingOrgContext(
                        OrgContextGap::NoOfferings,
                    ));
                }
                Ok(Submission::Manual {
                    chatbot,
                    organization: OrganizationPayload::from_draft(draft),
                })
            }
        }
    }

    /// Validate the draft and, on success, return its snapshot and start over
    /// with an empty draft. On failure the draft is left as it was.
    pub fn finalize(&mut self) -> Result<Submission, ValidationError> {
        let submission = self.validate()?;
        tracing::info!(
            mode = ?submission.mode(),
            chatbot = %submission.chatbot().name,
            "Organization draft finalized"
        );
        self.reset();
        Ok(submission)
    }

    /// Validate the draft and hand it to `boundary`.
    ///
    /// The draft is reset only once the service has accepted it, so a
    /// transport failure can be retried without re-entering anything.
    pub async fn publish(
        &mut self,
        boundary: &dyn CreationBoundary,
    ) -> Result<Submission, PublishError> {
        let submission = self.validate()?;
        boundary.create_organization(&submission).await?;
        tracing::info!(
            mode = ?submission.mode(),
            chatbot = %submission.chatbot().name,
            "Organization created"
        );
        self.reset();
        Ok(submission)
    }

    /// Discard everything entered so far.
    pub fn reset(&mut self) {
        self.draft = OrganizationDraft::default();
    }
}

fn required_pair(
    entry: EntryKind,
    first: &str,
    second: &str,
) -> Result<(String, String), DraftRejection> {
    let (first, second) = (first.trim(), second.trim());
    if first.is_empty() || second.is_empty() {
        tracing::debug!(entry = %entry, "Entry rejected: empty field");
        return Err(DraftRejection::EmptyField { entry });
    }
    Ok((first.to_string(), second.to_string()))
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    if index < items.len() {
        Some(items.remove(index))
    } else {
        tracing::debug!(index, len = items.len(), "Remove ignored: index out of range");
        None
    }
}

// =============================================================================
// Tests
// =============================================================================
