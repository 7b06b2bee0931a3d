use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of an organization known to the remote service.
///
/// Always trimmed and non-empty; construct with [`OrganizationId::parse`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Parse a raw identifier, returning `None` when it is blank.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Organization listing
// =============================================================================

/// One organization as returned by the listing endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Creation date, `YYYY-MM-DD` on the wire.
    pub created_at: NaiveDate,
    #[serde(default)]
    pub location: String,
}

impl OrganizationRecord {
    /// The identifier to bind a chat session to, if the record has one.
    pub fn organization_id(&self) -> Option<OrganizationId> {
        OrganizationId::parse(&self.id)
    }
}
