//! Reply-fetch collaborator.
//!
//! The widget hands the trimmed user text to a [`ReplyFetcher`] and gets back
//! either the reply text or [`ReplyUnavailable`]. Every failure cause
//! (unreachable host, non-2xx status, malformed body) collapses into that one
//! error; the detail is kept for logs only.
//!
//! - [`HttpReplyFetcher`]: `POST /chat` over reqwest

mod http;

pub use http::HttpReplyFetcher;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The reply service could not produce a reply.
#[derive(Debug, Error)]
#[error("reply unavailable: {detail}")]
pub struct ReplyUnavailable {
    detail: String,
}

impl ReplyUnavailable {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<reqwest::Error> for ReplyUnavailable {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Request body sent to the reply service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body expected from the reply service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Turns a user message into an agent reply.
#[async_trait]
pub trait ReplyFetcher: Send + Sync {
    async fn fetch_reply(&self, message: &str) -> Result<String, ReplyUnavailable>;
}
