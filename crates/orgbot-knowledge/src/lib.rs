//! Organization knowledge drafts for orgbot.
//!
//! Collects what the assistant should know about an organization, either a
//! single document or structured lists of employees, products and services,
//! and validates it into one submission for the creation endpoint.

pub mod aggregator;
pub mod boundary;
pub mod error;
pub mod types;

pub use aggregator::KnowledgeAggregator;
pub use boundary::CreationBoundary;
pub use error::{DraftRejection, EntryKind, OrgContextGap, PublishError, ValidationError};
pub use types::{
    ChatbotInfo, DocumentRef, Employee, IngestionMode, Offering, OrganizationDraft,
    OrganizationPayload, OrganizationProfile, Submission,
};
