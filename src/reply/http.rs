//! HTTP reply fetcher.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::{ChatReply, ChatRequest, ReplyFetcher, ReplyUnavailable};
use crate::config::ReplyConfig;

/// Calls `POST {base_url}{path}` with `{"message": ...}` and reads `{"response": ...}`.
#[derive(Debug, Clone)]
pub struct HttpReplyFetcher {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpReplyFetcher {
    /// Create a fetcher for `endpoint` (the full URL of the chat route).
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, url::ParseError> {
        Ok(Self {
            endpoint: Url::parse(endpoint.as_ref())?,
            http: reqwest::Client::new(),
        })
    }

    /// Build from the `reply` config section.
    pub fn from_config(config: &ReplyConfig) -> anyhow::Result<Self> {
        let endpoint = append_path(&Url::parse(&config.base_url)?, &config.path);

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            endpoint,
            http: builder.build()?,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `base` with `path` appended under its existing path, one `/` between them.
fn append_path(base: &Url, path: &str) -> Url {
    let mut endpoint = base.clone();
    endpoint.set_path(&format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    ));
    endpoint
}

#[async_trait]
impl ReplyFetcher for HttpReplyFetcher {
    async fn fetch_reply(&self, message: &str) -> Result<String, ReplyUnavailable> {
        let body = ChatRequest {
            message: message.to_string(),
        };

        let reply: ChatReply = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_path() {
        let config = ReplyConfig {
            base_url: "http://localhost:5000".to_string(),
            path: "/chat".to_string(),
            timeout_secs: None,
        };
        let fetcher = HttpReplyFetcher::from_config(&config).unwrap();
        assert_eq!(fetcher.endpoint().as_str(), "http://localhost:5000/chat");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = ReplyConfig {
            base_url: "http://gateway:5000/bot".to_string(),
            path: "/chat".to_string(),
            timeout_secs: None,
        };
        let fetcher = HttpReplyFetcher::from_config(&config).unwrap();
        assert_eq!(fetcher.endpoint().as_str(), "http://gateway:5000/bot/chat");

        let config = ReplyConfig {
            base_url: "http://gateway:5000/bot/".to_string(),
            path: "chat".to_string(),
            timeout_secs: None,
        };
        let fetcher = HttpReplyFetcher::from_config(&config).unwrap();
        assert_eq!(fetcher.endpoint().as_str(), "http://gateway:5000/bot/chat");
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(HttpReplyFetcher::new("not a url").is_err());
    }
}
