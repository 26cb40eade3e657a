use catalog_core::{CategorySummary, RemoteFetchError, ResultPage, SearchRequest};
use catalog_logging::{catalog_debug, catalog_trace};
use url::Url;
use serde::de::DeserializeOwned;

use crate::settings::ClientSettings;
use crate::wire::SearchResponseBody;

/// Remote catalog backend. Search ranking and relevance live behind it.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<ResultPage, RemoteFetchError>;

    async fn categories(&self) -> Result<Vec<CategorySummary>, RemoteFetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCatalogService {
    client: reqwest::Client,
    search_url: Url,
    categories_url: Url,
}

impl ReqwestCatalogService {
    pub fn new(settings: &ClientSettings) -> Result<Self, RemoteFetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| RemoteFetchError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            search_url: parse_endpoint(&settings.endpoint(&settings.search_path))?,
            categories_url: parse_endpoint(&settings.endpoint(&settings.categories_path))?,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RemoteFetchError> {
        catalog_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteFetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        catalog_trace!("Response status={} bytes={}", status, body.len());
        serde_json::from_str(&body).map_err(|err| RemoteFetchError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl CatalogService for ReqwestCatalogService {
    async fn search(&self, request: &SearchRequest) -> Result<ResultPage, RemoteFetchError> {
        let body: SearchResponseBody = self.get_json(request.to_url(&self.search_url)).await?;
        Ok(body.into())
    }

    async fn categories(&self) -> Result<Vec<CategorySummary>, RemoteFetchError> {
        self.get_json(self.categories_url.clone()).await
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, RemoteFetchError> {
    Url::parse(raw).map_err(|err| RemoteFetchError::InvalidUrl(format!("{raw}: {err}")))
}

fn map_reqwest_error(err: reqwest::Error) -> RemoteFetchError {
    if err.is_timeout() {
        return RemoteFetchError::Timeout;
    }
    if err.is_decode() {
        return RemoteFetchError::Decode(err.to_string());
    }
    RemoteFetchError::Transport(err.to_string())
}
