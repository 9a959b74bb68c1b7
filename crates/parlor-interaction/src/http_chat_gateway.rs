//! HttpChatGateway - REST client for the external chat API.
//!
//! One POST per chat turn. The endpoint, key, platform and user context all
//! come from the caller's settings, so a single client serves every store
//! and session.

use async_trait::async_trait;
use parlor_core::gateway::{ChatGateway, UpstreamAnswer};
use parlor_core::settings::ApiSettings;
use parlor_core::{ParlorError, Result};
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
    user_context: &'a str,
}

/// Gateway implementation over reqwest.
#[derive(Clone, Default)]
pub struct HttpChatGateway {
    client: Client,
}

impl HttpChatGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an existing client, e.g. one with a custom timeout.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    #[tracing::instrument(skip_all, fields(platform = %settings.platform, query_chars = query.chars().count()))]
    async fn send(&self, query: &str, settings: &ApiSettings) -> Result<UpstreamAnswer> {
        let body = ChatRequest {
            query,
            user_context: &settings.user_context,
        };

        let response = self
            .client
            .post(&settings.api_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &settings.api_key)
            .header("x-platform", &settings.platform)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ParlorError::upstream_transport(format!("Chat API request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Chat API returned an error status");
            return Err(ParlorError::upstream_status(status.as_u16(), error_text));
        }

        let answer: UpstreamAnswer = response.json().await.map_err(|e| ParlorError::Upstream {
            status: Some(status.as_u16()),
            message: format!("Failed to parse chat API response: {}", e),
        })?;

        tracing::debug!(
            answer_chars = answer.answer.chars().count(),
            flow_id = answer.flow_id.as_deref().unwrap_or(""),
            "Chat API answered"
        );
        Ok(answer)
    }
}
