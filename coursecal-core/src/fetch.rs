//! Retrieving feed documents over HTTP.

use std::future::Future;

use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::error::{RewriteError, RewriteResult};

const USER_AGENT: &str = concat!("coursecal/", env!("CARGO_PKG_VERSION"));

/// Something that can turn a URL into document text.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = RewriteResult<String>> + Send;
}

/// Plain HTTP GET; anything but `200 OK` is an error.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> RewriteResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RewriteError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> RewriteResult<String> {
        debug!("Fetching {}", url);

        let transport = |source| RewriteError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        if response.status() != StatusCode::OK {
            return Err(RewriteError::FetchStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }
}
