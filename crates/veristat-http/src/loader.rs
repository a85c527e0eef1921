//! Document loader retrieving status list credentials over HTTP.
use crate::config::HTTPConfig;
use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use veristat_core::verifier::{DocumentLoader, DocumentLoaderError};

/// Media types requested when fetching status list credentials.
const ACCEPT_HEADER: &str = "application/ld+json, application/json";

/// A [`DocumentLoader`] fetching JSON documents over HTTP.
///
/// Redirects are followed (reqwest's default policy, up to ten hops) and
/// requests carry a JSON-compatible accept header. Each fetch is subject to
/// the configured timeout.
pub struct HttpDocumentLoader {
    client: reqwest::Client,
    config: HTTPConfig,
}

impl HttpDocumentLoader {
    /// Constructs a loader with the given configuration.
    pub fn new(config: HTTPConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl Default for HttpDocumentLoader {
    fn default() -> Self {
        Self::new(HTTPConfig::default())
    }
}

#[async_trait]
impl DocumentLoader for HttpDocumentLoader {
    async fn fetch_document(&self, url: &str) -> Result<Value, DocumentLoaderError> {
        debug!("Fetching status list credential: {}", url);
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_HEADER)
            .timeout(Duration::from_secs(self.config.timeout_seconds));
        if let Some(user_agent) = &self.config.user_agent {
            request = request.header(reqwest::header::USER_AGENT, user_agent);
        }
        let response = request
            .send()
            .await
            .map_err(|err| DocumentLoaderError::Network(err.to_string()))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DocumentLoaderError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(DocumentLoaderError::ResponseStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|err| DocumentLoaderError::Malformed {
                url: url.to_string(),
                reason: err.to_string(),
            })
    }
}
