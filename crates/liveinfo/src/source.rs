//! Where the raw hours page comes from.

use async_trait::async_trait;
use parkguide_core::error::FetchError;
use std::time::Duration;
use tracing::debug;

/// Something that can produce the raw hours page.
#[async_trait]
pub trait HoursSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Fetch the page body.
    async fn fetch(&self) -> Result<String, FetchError>;
}

/// Fetches the hours page over HTTP GET.
pub struct HttpHoursSource {
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpHoursSource {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("parkguide/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            timeout_secs,
            client,
        })
    }
}

#[async_trait]
impl HoursSource for HttpHoursSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "Fetching hours page");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::Body(e.to_string())
            }
        })
    }
}
