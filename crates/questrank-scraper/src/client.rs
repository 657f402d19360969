use std::time::Duration;

use reqwest::Client;

use crate::error::FetchError;

/// HTTP client for public quest-report profile pages.
///
/// Non-2xx responses become typed errors. There is deliberately no retry:
/// a failed participant is recorded and reported, never re-fetched, so a
/// transient failure looks exactly like a permanent one.
pub struct ProfileClient {
    client: Client,
}

impl ProfileClient {
    /// Creates a `ProfileClient` with the configured timeout and
    /// `User-Agent`. The timeout covers the whole request, so a hung fetch
    /// surfaces as an ordinary fetch failure.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the markup of one profile page.
    ///
    /// # Errors
    ///
    /// - [`FetchError::UnexpectedStatus`] — any non-2xx status.
    /// - [`FetchError::Http`] — transport failure or timeout.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}
