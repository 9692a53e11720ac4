//! Job-Description Acquirer: pasted text is used verbatim; a URL is fetched once
//! and de-boilerplated into plain text.

pub mod fetch;
pub mod handlers;
pub mod scrape;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fetch::JobPageFetcher;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("provide either pasted job description text or a URL")]
    MissingInput,

    #[error("invalid job posting URL: {0}")]
    InvalidUrl(String),

    #[error("could not fetch job posting: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("job posting returned HTTP {0}")]
    Status(u16),

    #[error("job posting page contained no readable text")]
    EmptyPage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDescriptionInput {
    pub text: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum JobDescriptionSource {
    Pasted,
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub text: String,
    pub source: JobDescriptionSource,
}

/// Resolves the user's input into a job description.
///
/// Non-blank pasted text wins over a URL and is kept byte-for-byte. A failed
/// fetch yields no description; the caller decides whether to try again.
pub async fn acquire(
    input: JobDescriptionInput,
    fetcher: &JobPageFetcher,
) -> Result<JobDescription, AcquireError> {
    if let Some(text) = input.text.filter(|t| !t.trim().is_empty()) {
        return Ok(JobDescription {
            text,
            source: JobDescriptionSource::Pasted,
        });
    }

    let url = input
        .url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or(AcquireError::MissingInput)?;

    let text = fetcher.fetch_description(&url).await?;
    Ok(JobDescription {
        text,
        source: JobDescriptionSource::Url(url),
    })
}
