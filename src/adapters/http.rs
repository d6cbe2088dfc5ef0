use crate::domain::ports::HoroscopeSource;
use crate::utils::error::{HoroscopeError, Result};
use reqwest::Client;

/// Reads the static horoscope document over HTTP. One GET per call, no
/// retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl HoroscopeSource for HttpSource {
    async fn fetch_document(&self) -> Result<String> {
        tracing::debug!("Making API request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(HoroscopeError::HttpStatusError {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
