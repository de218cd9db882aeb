//! Linked-data client
//!
//! Talks to the patent linked-data service over HTTP.
//!
//! # Features
//!
//! - SPARQL queries sent as `GET ?query=...` with JSON results
//! - Entity documents fetched from `<identifier>.json`
//! - Retry logic with exponential backoff on transport errors and 5xx responses
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use patnet_sparql::{ClientConfig, LinkedDataClient};
//!
//! let client = LinkedDataClient::new(ClientConfig::default()).unwrap();
//! // list_publications / fetch_record / resolve are async
//! ```

use crate::config::ClientConfig;
use crate::query::{application_query, publication_query, PUBLICATION_COLUMN};
use crate::response::{EntityDocument, SparqlResults};
use crate::SparqlError;
use patnet_domain::traits::{NameService, QueryService};
use patnet_domain::{Authority, PublicationId, PublicationRecord, Window};
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Media type of SPARQL JSON results
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// HTTP client for the SPARQL endpoint and entity documents
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct LinkedDataClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl LinkedDataClient {
    /// Create a client from validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built
    pub fn new(config: ClientConfig) -> Result<Self, SparqlError> {
        config.validate().map_err(SparqlError::InvalidConfig)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SparqlError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries.max(1);
        self
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a SELECT query and decode the JSON results
    pub async fn select(&self, query: &str) -> Result<SparqlResults, SparqlError> {
        let response = self
            .send_with_retry(|| {
                self.client
                    .get(&self.config.endpoint)
                    .query(&[("query", query)])
                    .header(ACCEPT, SPARQL_RESULTS_JSON)
            })
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SparqlError::Status {
                status: status.as_u16(),
                message: truncate(&body, 200),
            });
        }

        response
            .json::<SparqlResults>()
            .await
            .map_err(|e| SparqlError::InvalidResponse(format!("Failed to parse SPARQL results: {}", e)))
    }

    /// Fetch the entity document for `identifier`
    ///
    /// `Ok(None)` when the service answers with a client error status.
    pub async fn entity_document(&self, identifier: &str) -> Result<Option<EntityDocument>, SparqlError> {
        let url = entity_document_url(identifier);
        let response = self.send_with_retry(|| self.client.get(&url)).await?;

        let status = response.status();
        if status.is_client_error() {
            debug!("Entity document {} answered {}", url, status);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SparqlError::Status {
                status: status.as_u16(),
                message: url,
            });
        }

        let document = response
            .json::<EntityDocument>()
            .await
            .map_err(|e| SparqlError::InvalidResponse(format!("Failed to parse entity document: {}", e)))?;
        Ok(Some(document))
    }

    /// Send a request, retrying transport errors and server errors
    ///
    /// Responses with any other status are returned to the caller.
    async fn send_with_retry<F>(&self, build: F) -> Result<Response, SparqlError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.config.max_retries {
            match build().send().await {
                Ok(response) if !is_retryable(response.status()) => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    last_error = Some(SparqlError::Status {
                        status: status.as_u16(),
                        message: status.canonical_reason().unwrap_or("server error").to_string(),
                    });
                }
                Err(e) => {
                    last_error = Some(SparqlError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.config.max_retries {
                // Exponential backoff: base, 2x base, 4x base, ...
                let delay = Duration::from_millis(self.config.retry_backoff_ms << (attempts - 1).min(16));
                if let Some(error) = &last_error {
                    warn!("Attempt {} failed ({}), retrying in {:?}", attempts, error, delay);
                }
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| SparqlError::Communication("Max retries exceeded".to_string())))
    }
}

impl QueryService for LinkedDataClient {
    type Error = SparqlError;

    async fn list_publications(
        &self,
        window: &Window,
        authority: &Authority,
    ) -> Result<Vec<PublicationId>, Self::Error> {
        let results = self.select(&application_query(window, authority)).await?;
        Ok(results.publications(PUBLICATION_COLUMN))
    }

    async fn fetch_record(&self, publication: &PublicationId) -> Result<PublicationRecord, Self::Error> {
        let query = publication_query(publication, &self.config.language)?;
        Ok(self.select(&query).await?.record())
    }
}

impl NameService for LinkedDataClient {
    type Error = SparqlError;

    async fn resolve(&self, identifier: &str) -> Result<Option<String>, Self::Error> {
        Ok(self
            .entity_document(identifier)
            .await?
            .and_then(|document| document.display_name()))
    }
}

/// Document URL of an entity: scheme upgraded to https, `.json` appended
pub fn entity_document_url(identifier: &str) -> String {
    match identifier.strip_prefix("http://") {
        Some(rest) => format!("https://{}.json", rest),
        None => format!("{}.json", identifier),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Whether a status code is retried by the client
pub fn is_retryable(status: StatusCode) -> bool {
    status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn unreachable_config() -> ClientConfig {
        ClientConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            retry_backoff_ms: 1,
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let client = LinkedDataClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.config().max_retries, 3);

        let client = client.with_max_retries(5);
        assert_eq!(client.config().max_retries, 5);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ClientConfig {
            max_retries: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(LinkedDataClient::new(config), Err(SparqlError::InvalidConfig(_))));
    }

    #[test]
    fn test_entity_document_url() {
        assert_eq!(
            entity_document_url("http://data.epo.org/linked-data/id/applicant-vc/1"),
            "https://data.epo.org/linked-data/id/applicant-vc/1.json"
        );
        assert_eq!(entity_document_url("https://already/secure"), "https://already/secure.json");
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
        assert!(!is_retryable(StatusCode::OK));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let client = LinkedDataClient::new(unreachable_config()).unwrap().with_max_retries(2);
        let window = Window::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 8).unwrap(),
        )
        .unwrap();

        let result = client.list_publications(&window, &Authority::european()).await;
        assert!(matches!(result, Err(SparqlError::Communication(_))));
    }

    #[tokio::test]
    async fn test_invalid_publication_uri_is_not_sent() {
        let client = LinkedDataClient::new(unreachable_config()).unwrap();
        let result = client.fetch_record(&PublicationId::new("bad uri")).await;
        assert!(matches!(result, Err(SparqlError::InvalidIri(_))));
    }

    // Integration tests (require network access to the public endpoint)
    #[tokio::test]
    #[ignore]
    async fn test_list_publications_live() {
        let client = LinkedDataClient::new(ClientConfig::default()).unwrap();
        let window = Window::new(
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
        )
        .unwrap();

        let publications = client.list_publications(&window, &Authority::european()).await.unwrap();
        if let Some(first) = publications.first() {
            let record = client.fetch_record(first).await.unwrap();
            assert!(!record.is_empty());
        }
    }
}
