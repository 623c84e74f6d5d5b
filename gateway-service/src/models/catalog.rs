use crate::models::record::Record;
use crate::models::requests::Filter;
use crate::services::filter::{apply_with_mode, MatchMode};
use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, error};

pub type MirrorLinks = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchColumn {
    Title,
    Author,
}

impl SearchColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchColumn::Title => "title",
            SearchColumn::Author => "author",
        }
    }
}

#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn search_by_title(&self, query: &str) -> Result<Vec<Record>, BackendError>;
    async fn search_by_author(&self, query: &str) -> Result<Vec<Record>, BackendError>;
    async fn resolve_download_links(&self, record: &Record) -> Result<MirrorLinks, BackendError>;

    async fn search_title_filtered(
        &self,
        query: &str,
        filters: &[Filter],
        mode: MatchMode,
    ) -> Result<Vec<Record>, BackendError> {
        let records = self.search_by_title(query).await?;
        Ok(apply_with_mode(records, filters, mode))
    }

    async fn search_author_filtered(
        &self,
        query: &str,
        filters: &[Filter],
        mode: MatchMode,
    ) -> Result<Vec<Record>, BackendError> {
        let records = self.search_by_author(query).await?;
        Ok(apply_with_mode(records, filters, mode))
    }
}

pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn search(&self, column: SearchColumn, query: &str) -> Result<Vec<Record>, BackendError> {
        let url = format!("{}/search", self.base_url);
        debug!("Catalog search column={} query={:?}", column.as_str(), query);

        let response = self
            .client
            .get(&url)
            .query(&[("req", query), ("column", column.as_str())])
            .send()
            .await?;

        let body = read_success_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<Vec<u8>, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        error!("Catalog responded with {}: {}", status, message);
        return Err(BackendError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.bytes().await?.to_vec())
}

#[async_trait]
impl CatalogBackend for HttpCatalog {
    async fn search_by_title(&self, query: &str) -> Result<Vec<Record>, BackendError> {
        self.search(SearchColumn::Title, query).await
    }

    async fn search_by_author(&self, query: &str) -> Result<Vec<Record>, BackendError> {
        self.search(SearchColumn::Author, query).await
    }

    async fn resolve_download_links(&self, record: &Record) -> Result<MirrorLinks, BackendError> {
        let url = format!("{}/mirrors", self.base_url);

        let response = self.client.post(&url).json(record).send().await?;

        let body = read_success_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
