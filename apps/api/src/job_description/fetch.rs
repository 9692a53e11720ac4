use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::job_description::scrape::html_to_text;
use crate::job_description::AcquireError;

const FETCH_TIMEOUT_SECS: u64 = 10;
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Fetches job posting pages. One GET per call, fixed timeout, no retry.
#[derive(Clone)]
pub struct JobPageFetcher {
    client: Client,
}

impl JobPageFetcher {
    pub fn new() -> Result<Self, AcquireError> {
        Ok(Self {
            client: Client::builder()
                .user_agent(BROWSER_USER_AGENT)
                .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build()?,
        })
    }

    pub async fn fetch_description(&self, url: &str) -> Result<String, AcquireError> {
        let parsed = Url::parse(url).map_err(|e| AcquireError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AcquireError::InvalidUrl(format!(
                "{url}: only http and https are supported"
            )));
        }

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Job posting fetch returned {status} for {url}");
            return Err(AcquireError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        let text = html_to_text(&html);
        debug!(
            "Fetched job posting: {} bytes of HTML, {} chars of text",
            html.len(),
            text.len()
        );

        if text.is_empty() {
            return Err(AcquireError::EmptyPage);
        }
        Ok(text)
    }
}
