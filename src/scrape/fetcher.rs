use crate::config::LeafletConfig;
use crate::error::LeafletError;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Result<Self, LeafletError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &LeafletConfig) -> Result<Self, LeafletError> {
        Self::new(Some(config.request_timeout()), &config.user_agent)
    }

    pub async fn fetch(&self, url: &str) -> Result<String, LeafletError> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LeafletError> {
        debug!("Fetching JSON {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}
