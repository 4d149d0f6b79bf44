//! Whiteboard analysis through the Anthropic Messages API.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use logging::redact_sensitive_data;
use whiteboard_core::{AnalysisResult, EncodedImage, ImageMediaType, NotesError, Result, WhiteboardAnalyzer};

use crate::prompt::{user_instruction, SYSTEM_PROMPT};
use crate::reply::parse_analysis;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_MAX_TOKENS: u32 = 3000;
const API_VERSION: &str = "2023-06-01";

/// Vision analyzer backed by one long-lived HTTP client.
pub struct AnthropicAnalyzer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicAnalyzer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Build the single-turn request for `image`.
    pub fn build_request<'a>(&'a self, image: &'a EncodedImage) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: SYSTEM_PROMPT,
            messages: vec![RequestMessage {
                role: "user",
                content: vec![
                    RequestBlock::Text {
                        text: user_instruction(),
                    },
                    RequestBlock::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type: image.media_type,
                            data: &image.data,
                        },
                    },
                ],
            }],
        }
    }

    /// Turn a decoded reply into notes.
    ///
    /// A reply stopped by the output budget is reported as truncated even if
    /// its text happens to parse. Only the first text block is considered.
    pub fn interpret_reply(&self, reply: &MessagesResponse) -> Result<AnalysisResult> {
        if reply.stop_reason.as_deref() == Some("max_tokens") {
            return Err(NotesError::Truncated {
                max_tokens: self.max_tokens,
            });
        }
        let text = reply.first_text().ok_or(NotesError::EmptyReply)?;
        parse_analysis(text)
    }
}

#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub system: &'a str,
    pub messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestMessage<'a> {
    pub role: &'static str,
    pub content: Vec<RequestBlock<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBlock<'a> {
    Text { text: String },
    Image { source: ImageSource<'a> },
}

#[derive(Debug, Serialize)]
pub struct ImageSource<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media_type: ImageMediaType,
    pub data: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ResponseBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl MessagesResponse {
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ResponseBlock::Text { text } => Some(text.as_str()),
            ResponseBlock::Other => None,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Prefer the provider's own error message; fall back to the raw body.
fn provider_error_message(body: &str) -> String {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    redact_sensitive_data(&message)
}

#[async_trait]
impl WhiteboardAnalyzer for AnthropicAnalyzer {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn analyze(&self, image: &EncodedImage) -> Result<AnalysisResult> {
        let start = Instant::now();
        let body = self.build_request(image);

        debug!(
            model = %self.model,
            media_type = %image.media_type,
            image_b64_len = image.data.len(),
            "Sending whiteboard to Anthropic"
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotesError::Http(redact_sensitive_data(&e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = provider_error_message(&error_body);
            warn!(status = status.as_u16(), message = %message, "Anthropic returned an error");
            return Err(NotesError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let reply: MessagesResponse = response
            .json()
            .await
            .map_err(|e| NotesError::Http(format!("failed to decode Anthropic response: {e}")))?;

        let usage = reply.usage.as_ref();
        info!(
            model = %self.model,
            stop_reason = reply.stop_reason.as_deref().unwrap_or("unknown"),
            input_tokens = usage.and_then(|u| u.input_tokens).unwrap_or(0),
            output_tokens = usage.and_then(|u| u.output_tokens).unwrap_or(0),
            latency_ms = start.elapsed().as_millis() as u64,
            "Anthropic analysis complete"
        );

        self.interpret_reply(&reply)
    }
}
