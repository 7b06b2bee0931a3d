//! Error types for organization drafts.

use std::fmt;

use orgbot_core::TransportError;

/// The collection an entry was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Employee,
    Product,
    Service,
}

impl EntryKind {
    /// Name of the second required field of this entry kind.
    pub fn detail_label(&self) -> &'static str {
        match self {
            EntryKind::Employee => "role",
            EntryKind::Product | EntryKind::Service => "details",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Employee => "Employee",
            EntryKind::Product => "Product",
            EntryKind::Service => "Service",
        };
        f.write_str(label)
    }
}

/// An edit the draft refused. The draft is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftRejection {
    #[error("{entry} name and {} are required", .entry.detail_label())]
    EmptyField { entry: EntryKind },
    #[error("Please select a PDF file (got {content_type})")]
    UnsupportedDocument { content_type: String },
}

/// What is missing for manual mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgContextGap {
    MissingName,
    NoOfferings,
}

impl fmt::Display for OrgContextGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrgContextGap::MissingName => {
                f.write_str("Organization name is required in Manual mode")
            }
            OrgContextGap::NoOfferings => {
                f.write_str("Please add at least one product or one service")
            }
        }
    }
}

/// Why a draft cannot be finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please provide Chatbot Name and Description")]
    MissingCommon,
    #[error("Please upload a PDF file for Automatic mode")]
    MissingDocument,
    #[error("{0}")]
    MissingOrgContext(OrgContextGap),
}

/// Failure of [`KnowledgeAggregator::publish`](crate::KnowledgeAggregator::publish).
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("creation failed: {0}")]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_rejection_display() {
        let err = DraftRejection::EmptyField {
            entry: EntryKind::Employee,
        };
        assert_eq!(err.to_string(), "Employee name and role are required");

        let err = DraftRejection::EmptyField {
            entry: EntryKind::Product,
        };
        assert_eq!(err.to_string(), "Product name and details are required");

        let err = DraftRejection::EmptyField {
            entry: EntryKind::Service,
        };
        assert_eq!(err.to_string(), "Service name and details are required");

        let err = DraftRejection::UnsupportedDocument {
            content_type: "text/plain".to_string(),
        };
        assert_eq!(err.to_string(), "Please select a PDF file (got text/plain)");
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingCommon.to_string(),
            "Please provide Chatbot Name and Description"
        );
        assert_eq!(
            ValidationError::MissingDocument.to_string(),
            "Please upload a PDF file for Automatic mode"
        );
        assert_eq!(
            ValidationError::MissingOrgContext(OrgContextGap::MissingName).to_string(),
            "Organization name is required in Manual mode"
        );
        assert_eq!(
            ValidationError::MissingOrgContext(OrgContextGap::NoOfferings).to_string(),
            "Please add at least one product or one service"
        );
    }

    #[test]
    fn test_publish_error_from_conversions() {
        let err: PublishError = ValidationError::MissingCommon.into();
        assert!(matches!(err, PublishError::Validation(_)));

        let err: PublishError = TransportError::Status {
            status: 409,
            message: "name taken".to_string(),
        }
        .into();
        assert!(matches!(err, PublishError::Transport(_)));
        assert_eq!(err.to_string(), "creation failed: name taken");
    }
}
