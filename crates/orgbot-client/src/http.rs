//! HTTP binding for the remote assistant service.
//!
//! One client implements all three boundaries:
//! - `POST {base}/api/query/{organization_id}` with `{"query": ...}`
//! - `GET  {base}/api/organizations`
//! - `POST {base}/api/organizations` with the submission JSON
//!
//! Error replies carry a human-readable `error` field; when it is missing a
//! generic reason is used instead.

use std::time::Duration;

use async_trait::async_trait;
use orgbot_chat::QueryBoundary;
use orgbot_core::config::ServiceConfig;
use orgbot_core::{
    CoreError, OrganizationDirectory, OrganizationId, OrganizationRecord, TransportError,
};
use orgbot_knowledge::{CreationBoundary, Submission};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};

const QUERY_FAILED: &str = "Failed to get response";
const LIST_FAILED: &str = "Failed to list organizations";
const CREATE_FAILED: &str = "Failed to create organization";

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryReply {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: Option<String>,
}

/// reqwest-backed client for the assistant service.
#[derive(Debug, Clone)]
pub struct HttpServiceClient {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl HttpServiceClient {
    /// Build a client from the `[service]` configuration section.
    pub fn new(config: &ServiceConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| CoreError::Config(format!("invalid base_url {:?}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::Config(format!(
                "base_url {:?} cannot hold a path",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                secs: self.timeout_secs,
            }
        } else if err.is_connect() {
            TransportError::Network(format!("connection failed: {}", err))
        } else {
            TransportError::Network(err.to_string())
        }
    }

    /// Read a successful body as `T`.
    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, TransportError> {
        let body = response.text().await.map_err(|e| self.send_error(e))?;
        serde_json::from_str(&body).map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

/// Turn a non-success reply into a [`TransportError::Status`].
async fn read_failure(response: Response, fallback: &str) -> TransportError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorReply>(&body)
        .ok()
        .and_then(|reply| reply.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    TransportError::Status { status, message }
}

#[async_trait]
impl QueryBoundary for HttpServiceClient {
    async fn query(
        &self,
        organization_id: &OrganizationId,
        query: &str,
    ) -> Result<String, TransportError> {
        let url = self.endpoint(&["api", "query", organization_id.as_str()]);
        let response = self
            .client
            .post(url)
            .json(&QueryRequest { query })
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        tracing::debug!(organization_id = %organization_id, status = status.as_u16(), "Query answered");
        if !status.is_success() {
            return Err(read_failure(response, QUERY_FAILED).await);
        }
        let reply: QueryReply = self.read_json(response).await?;
        Ok(reply.response)
    }
}

#[async_trait]
impl OrganizationDirectory for HttpServiceClient {
    async fn list_organizations(&self) -> Result<Vec<OrganizationRecord>, TransportError> {
        let response = self
            .client
            .get(self.endpoint(&["api", "organizations"]))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        if !response.status().is_success() {
            return Err(read_failure(response, LIST_FAILED).await);
        }
        let records: Vec<OrganizationRecord> = self.read_json(response).await?;
        tracing::debug!(count = records.len(), "Organizations listed");
        Ok(records)
    }
}

#[async_trait]
impl CreationBoundary for HttpServiceClient {
    async fn create_organization(&self, submission: &Submission) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.endpoint(&["api", "organizations"]))
            .json(submission)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), mode = ?submission.mode(), "Creation answered");
        if !status.is_success() {
            return Err(read_failure(response, CREATE_FAILED).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> Result<HttpServiceClient, CoreError> {
        HttpServiceClient::new(&ServiceConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 5,
        })
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let c = client("http://localhost:5050").unwrap();
        assert_eq!(
            c.endpoint(&["api", "query", "42"]).as_str(),
            "http://localhost:5050/api/query/42"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash_and_prefix() {
        let c = client("https://bots.example.com/v1/").unwrap();
        assert_eq!(
            c.endpoint(&["api", "organizations"]).as_str(),
            "https://bots.example.com/v1/api/organizations"
        );
    }

    #[test]
    fn test_endpoint_encodes_organization_id() {
        let c = client("http://localhost:5050").unwrap();
        let url = c.endpoint(&["api", "query", "a b/c"]);
        assert_eq!(url.as_str(), "http://localhost:5050/api/query/a%20b%2Fc");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(client("not a url"), Err(CoreError::Config(_))));
        assert!(matches!(client("mailto:bots@example.com"), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_is_accepted() {
        let c = HttpServiceClient::new(&ServiceConfig {
            base_url: "http://localhost:5050".to_string(),
            request_timeout_secs: 0,
        });
        assert!(c.is_ok());
    }
}
