//! Outbound chat API boundary.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::settings::ApiSettings;

/// A successful answer from the external chat API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamAnswer {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_alias_id: Option<String>,
}

/// Sends an assembled query to the external chat API.
///
/// One attempt per call. Failures surface as `ParlorError::Upstream`.
#[async_trait::async_trait]
pub trait ChatGateway: Send + Sync {
    async fn send(&self, query: &str, settings: &ApiSettings) -> Result<UpstreamAnswer>;
}
