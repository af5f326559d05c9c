//! Transport seam and the HTTP implementation of the Messages API.

use std::time::Duration;

use async_trait::async_trait;

use super::error::{LLMError, api_error};
use super::types::{MessagesRequest, MessagesResponse};
use crate::config::LlmConfig;
use crate::credential::Credential;

/// Carries one request to the completion service and returns its reply.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn create_message(
        &self,
        credential: &Credential,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, LLMError>;
}

/// Messages API over HTTPS via reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
}

impl HttpTransport {
    pub fn new(config: &LlmConfig) -> Result<Self, LLMError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self::with_client(builder.build()?, config))
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &LlmConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
        }
    }

    fn build_request(
        &self,
        url: &str,
        credential: &Credential,
        body: &MessagesRequest,
    ) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Content-Type", "application/json")
            .header("accept", "application/json")
            .header("anthropic-version", &self.api_version)
            .header("x-api-key", credential.expose())
            .json(body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn create_message(
        &self,
        credential: &Credential,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, LLMError> {
        let url = format!("{}/v1/messages", self.base_url);

        let response = self.build_request(&url, credential, request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, body));
        }

        Ok(response.json().await?)
    }
}
