use std::path::Path;

use orgbot_core::error::Result;
use serde::{Deserialize, Serialize};

// =============================================================================
// Draft building blocks
// =============================================================================

/// How the organization's knowledge is supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionMode {
    /// A single document describes the organization (default).
    #[default]
    Automatic,
    /// Structured entry of profile, employees, products and services.
    Manual,
}

impl IngestionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestionMode::Automatic => "automatic",
            IngestionMode::Manual => "manual",
        }
    }
}

/// Reference to an uploaded document. The content itself is never read here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl DocumentRef {
    pub const PDF: &'static str = "application/pdf";

    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size_bytes,
        }
    }

    /// Describe the file at `path`, guessing the content type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            )
            .into());
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(file_name, content_type_for(path), metadata.len()))
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case(Self::PDF)
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => DocumentRef::PDF,
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Basic facts about the organization (manual mode).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    pub name: String,
    pub website: String,
    pub industry: String,
    pub about: String,
}

impl OrganizationProfile {
    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            website: self.website.trim().to_string(),
            industry: self.industry.trim().to_string(),
            about: self.about.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub role: String,
}

/// A product or a service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    pub name: String,
    pub details: String,
}

/// The in-progress, not yet submitted organization record.
///
/// Both payload branches are kept regardless of `mode`; only the branch
/// selected by `mode` is validated and submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrganizationDraft {
    pub name: String,
    pub description: String,
    pub mode: IngestionMode,
    pub document: Option<DocumentRef>,
    pub profile: OrganizationProfile,
    pub employees: Vec<Employee>,
    pub products: Vec<Offering>,
    pub services: Vec<Offering>,
}

impl OrganizationDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// Submission snapshot
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotInfo {
    pub name: String,
    pub description: String,
}

/// Organization sub-record of a manual submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationPayload {
    pub name: String,
    pub website: String,
    pub industry: String,
    pub about: String,
    pub employees: Vec<Employee>,
    pub products: Vec<Offering>,
    pub services: Vec<Offering>,
}

impl OrganizationPayload {
    pub(crate) fn from_draft(draft: &OrganizationDraft) -> Self {
        let profile = draft.profile.trimmed();
        Self {
            name: profile.name,
            website: profile.website,
            industry: profile.industry,
            about: profile.about,
            employees: draft.employees.clone(),
            products: draft.products.clone(),
            services: draft.services.clone(),
        }
    }
}

/// Immutable snapshot handed to the creation endpoint, tagged by `mode`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Submission {
    Automatic {
        chatbot: ChatbotInfo,
        document: DocumentRef,
    },
    Manual {
        chatbot: ChatbotInfo,
        organization: OrganizationPayload,
    },
}

impl Submission {
    pub fn mode(&self) -> IngestionMode {
        match self {
            Submission::Automatic { .. } => IngestionMode::Automatic,
            Submission::Manual { .. } => IngestionMode::Manual,
        }
    }

    pub fn chatbot(&self) -> &ChatbotInfo {
        match self {
            Submission::Automatic { chatbot, .. } | Submission::Manual { chatbot, .. } => chatbot,
        }
    }
}
