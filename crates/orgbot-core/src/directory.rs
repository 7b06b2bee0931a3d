//! Organization listing boundary.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::{OrganizationId, OrganizationRecord};

/// Source of the organizations a user can open a chat session with.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    /// Fetch every organization the service knows about.
    async fn list_organizations(&self) -> Result<Vec<OrganizationRecord>, TransportError>;

    /// Look up a single organization by identifier.
    ///
    /// The default implementation scans [`list_organizations`](Self::list_organizations).
    async fn find_organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<OrganizationRecord>, TransportError> {
        let records = self.list_organizations().await?;
        Ok(records
            .into_iter()
            .find(|r| r.organization_id().as_ref() == Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedDirectory(Vec<OrganizationRecord>);

    #[async_trait]
    impl OrganizationDirectory for FixedDirectory {
        async fn list_organizations(&self) -> Result<Vec<OrganizationRecord>, TransportError> {
            Ok(self.0.clone())
        }
    }

    struct DownDirectory;

    #[async_trait]
    impl OrganizationDirectory for DownDirectory {
        async fn list_organizations(&self) -> Result<Vec<OrganizationRecord>, TransportError> {
            Err(TransportError::Network("connection refused".to_string()))
        }
    }

    fn record(id: &str, name: &str) -> OrganizationRecord {
        OrganizationRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            location: "Germany".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_organization_hit() {
        let dir = FixedDirectory(vec![record("1", "Sales"), record("2", "Tech Helper")]);
        let id = OrganizationId::parse("2").unwrap();
        let found = dir.find_organization(&id).await.unwrap();
        assert_eq!(found.unwrap().name, "Tech Helper");
    }

    #[tokio::test]
    async fn test_find_organization_miss() {
        let dir = FixedDirectory(vec![record("1", "Sales")]);
        let id = OrganizationId::parse("99").unwrap();
        assert!(dir.find_organization(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_organization_propagates_transport_error() {
        let id = OrganizationId::parse("1").unwrap();
        let err = DownDirectory.find_organization(&id).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
