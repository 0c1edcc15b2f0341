use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::buffer::model::{GraphQlError, GraphQlResponse};

pub mod model;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to reach the Buffer API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Buffer API returned {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("GraphQL errors:\n{}", format_graphql_errors(.0))]
    GraphQl(Vec<GraphQlError>),
    #[error("invalid response JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response contained no data")]
    MissingData,
}

fn format_graphql_errors(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {}", e.message_text()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Seam for command handlers: one GraphQL round trip.
#[async_trait]
pub trait BufferApi: Send + Sync {
    async fn graphql(&self, query: &str, variables: Option<Value>) -> Result<Value, ApiError>;
}

#[derive(Clone)]
pub struct BufferClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for BufferClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl BufferClient {
    pub fn new(cfg: &Config) -> Self {
        Self::with_base_url(cfg.api_key.clone(), cfg.api_url.clone())
    }

    pub fn with_base_url(token: String, base_url: Url) -> Self {
        let http = Client::builder()
            .user_agent("buffer-cli/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client");
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Build the authenticated POST carrying `{query, variables}`.
    /// The `variables` key is omitted entirely when none are given.
    pub fn build_request(
        &self,
        query: &str,
        variables: Option<&Value>,
    ) -> Result<reqwest::Request, ApiError> {
        let mut body = json!({ "query": query });
        if let Some(vars) = variables {
            body["variables"] = vars.clone();
        }
        let request = self
            .http
            .post(self.base_url.clone())
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .json(&body)
            .build()?;
        Ok(request)
    }

    /// Single-shot request semantics: no retry, no backoff. Any HTTP or
    /// GraphQL-level failure is terminal for the invocation.
    pub async fn graphql(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<Value, ApiError> {
        let request = self.build_request(query, variables.as_ref())?;
        debug!(url = %request.url(), "sending GraphQL request (Authorization: Bearer [REDACTED])");

        let res = self.http.execute(request).await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ApiError::Http { status, body });
        }
        unwrap_envelope(&body)
    }
}

/// Decode the response envelope. A non-empty `errors` array is fatal
/// even when `data` is also present.
fn unwrap_envelope(body: &str) -> Result<Value, ApiError> {
    let envelope: GraphQlResponse = serde_json::from_str(body)?;
    if !envelope.errors.is_empty() {
        return Err(ApiError::GraphQl(envelope.errors));
    }
    envelope
        .data
        .filter(|data| !data.is_null())
        .ok_or(ApiError::MissingData)
}

#[async_trait]
impl BufferApi for BufferClient {
    async fn graphql(&self, query: &str, variables: Option<Value>) -> Result<Value, ApiError> {
        BufferClient::graphql(self, query, variables).await
    }
}
