//! ChatApiAgent - REST client for the conversational agent's turn endpoint.

use crate::http::{build_client, error_message};
use async_trait::async_trait;
use reqwest::Client;
use roi_core::agent::{AgentGateway, AgentReply, AgentRequest};
use roi_core::config::ServiceConfig;
use roi_core::error::{Result, RoiError};

/// Agent gateway that posts turns to the remote `chat` endpoint.
#[derive(Clone)]
pub struct ChatApiAgent {
    client: Client,
    url: String,
}

impl ChatApiAgent {
    /// Creates an agent posting to the given URL.
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Creates an agent from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(build_client(config)?, config.chat_url()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AgentGateway for ChatApiAgent {
    async fn send_turn(&self, request: &AgentRequest) -> Result<AgentReply> {
        tracing::debug!(
            "[ChatApiAgent] POST {} (system={}, history={}, correction={})",
            self.url,
            request.system,
            request.conversation_history.len(),
            request.correction_context.is_some()
        );

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                RoiError::agent_call_failed(None, format!("Chat API request failed: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read chat error body".to_string());
            return Err(RoiError::agent_call_failed(
                Some(status.as_u16()),
                error_message(status, &body),
            ));
        }

        let reply: AgentReply = response.json().await.map_err(|err| {
            RoiError::agent_call_failed(
                Some(status.as_u16()),
                format!("Failed to parse chat response: {err}"),
            )
        })?;

        tracing::debug!(
            "[ChatApiAgent] Reply status={:?}, success={}",
            reply.status,
            reply.success
        );
        Ok(reply)
    }
}
