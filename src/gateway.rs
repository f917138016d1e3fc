//! Remote gateway for the DevGPT HTTP API.
//!
//! The server exposes two JSON endpoints; everything interesting
//! (chunking, embedding, retrieval, the LLM) happens behind them:
//!
//! | Endpoint | Request | Success response |
//! |----------|---------|------------------|
//! | `POST /api/initialize` | `{"code_path": string}` | `{"num_chunks": integer}` |
//! | `POST /api/ask` | `{"question": string}` | `{"answer": string}` |
//!
//! Failures come back as a non-2xx status with either a JSON body
//! `{"error": string}` or plain text. [`HttpGateway`] normalizes all
//! outcomes into [`GatewayError`]: the server's own error text is
//! preferred, then the raw body, then a generic status-line fallback.
//! There is no retry and no caching; the only timeout is the one
//! configured on the HTTP client.
//!
//! [`Gateway`] is the seam the session controller is generic over, so
//! the state machine can be tested against a scripted implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::ServerConfig;

/// Normalized failure from a remote operation.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request failed before any response arrived.
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered with a non-success status. Displays as the
    /// bare server message so callers can surface it directly.
    #[error("{message}")]
    Remote { status: u16, message: String },
    /// The server answered 2xx but the body did not decode.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// The two remote operations the session controller can request.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Have the server chunk and embed the repository at `code_path`,
    /// returning the number of chunks it produced.
    async fn embed(&self, code_path: &str) -> Result<u64, GatewayError>;

    /// Answer a natural-language question over the embedded chunks.
    async fn ask(&self, question: &str) -> Result<String, GatewayError>;
}

#[derive(Serialize)]
struct InitializeRequest<'a> {
    code_path: &'a str,
}

#[derive(Deserialize)]
struct InitializeResponse {
    num_chunks: u64,
}

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`Gateway`] implementation over reqwest.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, GatewayError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(GatewayError::Remote {
            status: status.as_u16(),
            message: error_message(status, &text),
        })
    }
}

/// Pick the most useful human-readable message out of an error
/// response: the `error` field if the body is the JSON error shape,
/// otherwise the body itself, otherwise the status line.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("server returned {}", status)
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn embed(&self, code_path: &str) -> Result<u64, GatewayError> {
        let response = self
            .post("/api/initialize", &InitializeRequest { code_path })
            .await?;
        let body: InitializeResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(body.num_chunks)
    }

    async fn ask(&self, question: &str) -> Result<String, GatewayError> {
        let response = self.post("/api/ask", &AskRequest { question }).await?;
        let body: AskResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(body.answer)
    }
}
