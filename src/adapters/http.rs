use crate::domain::ports::{ConfigProvider, FetchResponse, Fetcher};
use crate::utils::error::{DashError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Backend fetcher over `reqwest`.
///
/// Request paths are joined onto the base URL the way a browser resolves a
/// relative `fetch`: with base `http://host/dash/`, `state` becomes
/// `http://host/dash/state`, while a base without the trailing slash replaces
/// its last segment.
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base(base_url)?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: parse_base(config.base_url())?,
        })
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|source| DashError::InvalidUrl {
                value: path.to_string(),
                source,
            })
    }
}

fn parse_base(base_url: &str) -> Result<Url> {
    Url::parse(base_url).map_err(|source| DashError::InvalidUrl {
        value: base_url.to_string(),
        source,
    })
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse> {
        let url = self.resolve(path)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.bytes().await?;
        Ok(FetchResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}
