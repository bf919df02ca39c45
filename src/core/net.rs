// src/core/net.rs

// Upstream fetch. The rankings host only speaks TLS, so this goes through
// reqwest rather than a raw socket; one GET per lookup, no retries.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::Error;

/// Where rankings documents come from. The server and tests swap in canned
/// documents through this seam.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, Error>;
}

pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, Error> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.text().await?)
    }
}
