//! The request wrapper: one prompt in, one completion out.

use std::num::NonZeroU32;
use std::sync::Arc;

use tracing::{debug, error, info};

use super::error::LLMError;
use super::transport::{HttpTransport, Transport};
use super::types::MessagesRequest;
use crate::config::LlmConfig;
use crate::credential::Credential;

/// Fixed prompt used by [`Client::self_test`].
pub const DIAGNOSTIC_PROMPT: &str = "Say 'Hello from aiwrap!' and nothing else.";

/// Model and output length used when a call does not override them.
#[derive(Debug, Clone)]
pub struct RequestDefaults {
    pub model: String,
    pub max_output_tokens: NonZeroU32,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self::from(&LlmConfig::default())
    }
}

impl From<&LlmConfig> for RequestDefaults {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }
}

/// Per-call overrides for [`Client::send`].
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub model: Option<String>,
    pub max_output_tokens: Option<NonZeroU32>,
}

/// Sends single-turn prompts to the completion service.
///
/// Holds no per-call state, so clones share the transport and may be used
/// concurrently.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    credential: Option<Credential>,
    defaults: RequestDefaults,
}

impl Client {
    /// Build a client over HTTP. Does not look at the environment.
    pub fn new(credential: Option<Credential>, config: &LlmConfig) -> Result<Self, LLMError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            credential,
            RequestDefaults::from(config),
        ))
    }

    /// Like [`Client::new`], falling back to the environment when no
    /// credential is given.
    pub fn from_env(credential: Option<Credential>, config: &LlmConfig) -> Result<Self, LLMError> {
        Self::from_lookup(credential, config, |name| std::env::var(name).ok())
    }

    /// Like [`Client::from_env`], reading variables through `lookup`.
    pub fn from_lookup(
        credential: Option<Credential>,
        config: &LlmConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, LLMError> {
        Self::new(
            credential.or_else(|| Credential::from_lookup(lookup)),
            config,
        )
    }

    #[must_use]
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        credential: Option<Credential>,
        defaults: RequestDefaults,
    ) -> Self {
        Self {
            transport,
            credential,
            defaults,
        }
    }

    fn credential(&self) -> Result<&Credential, LLMError> {
        self.credential
            .as_ref()
            .filter(|c| !c.is_empty())
            .ok_or(LLMError::MissingCredential)
    }

    /// Send `prompt` as the only user turn and return the first text block of
    /// the reply.
    pub async fn send(&self, prompt: &str, options: SendOptions) -> Result<String, LLMError> {
        let credential = self.credential()?;

        let request = MessagesRequest::single_turn(
            options.model.unwrap_or_else(|| self.defaults.model.clone()),
            options
                .max_output_tokens
                .unwrap_or(self.defaults.max_output_tokens),
            prompt,
        );

        debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            prompt_len = prompt.len(),
            "sending completion request"
        );

        let result = self.request_text(credential, &request).await;
        if let Err(ref e) = result {
            error!(error = %e, "completion request failed");
        }
        result
    }

    async fn request_text(
        &self,
        credential: &Credential,
        request: &MessagesRequest,
    ) -> Result<String, LLMError> {
        let response = self.transport.create_message(credential, request).await?;

        if let Some(usage) = response.usage {
            debug!(
                stop_reason = response.stop_reason.as_deref().unwrap_or("unknown"),
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "completion received"
            );
        }

        response.into_first_text()
    }

    /// Send [`DIAGNOSTIC_PROMPT`] with default options to confirm connectivity.
    pub async fn self_test(&self) -> Result<String, LLMError> {
        self.credential()?;
        info!(model = %self.defaults.model, "running diagnostic request");
        self.send(DIAGNOSTIC_PROMPT, SendOptions::default()).await
    }
}
