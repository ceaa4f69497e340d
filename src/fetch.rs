use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::error::ScrapeError;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; SimpleScraper/1.0)";

/// Outbound page fetcher. Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

/// A response whose headers have arrived but whose body is still unread.
#[derive(Debug)]
pub struct FetchedPage {
    pub status: StatusCode,
    response: Response,
}

impl Fetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ScrapeError> {
        let mut builder = reqwest::ClientBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ScrapeError::RequestBuild(e.to_string()))?;
        Ok(Fetcher { client })
    }

    /// GET `target`. Any HTTP status counts as success; only failing to reach
    /// the server is an error.
    pub async fn fetch(&self, target: &str) -> Result<FetchedPage, ScrapeError> {
        let url = validate_target(target)?;

        let request = self
            .client
            .get(url)
            .build()
            .map_err(|e| ScrapeError::RequestBuild(e.to_string()))?;

        let response = self.client.execute(request).await.map_err(|e| {
            if e.is_builder() {
                ScrapeError::RequestBuild(e.to_string())
            } else {
                ScrapeError::Network(e.to_string())
            }
        })?;

        Ok(FetchedPage {
            status: response.status(),
            response,
        })
    }
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub async fn read_body(self) -> Result<Bytes, ScrapeError> {
        self.response
            .bytes()
            .await
            .map_err(|e| ScrapeError::Parse(e.to_string()))
    }
}

fn validate_target(target: &str) -> Result<Url, ScrapeError> {
    let url = Url::parse(target).map_err(|e| ScrapeError::InvalidTarget(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ScrapeError::InvalidTarget(format!(
            "unsupported protocol scheme \"{}\"",
            url.scheme()
        )));
    }
    if !url.has_host() {
        return Err(ScrapeError::InvalidTarget(format!("no host in url {target}")));
    }
    Ok(url)
}
