#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use gateway_service::models::catalog::{BackendError, CatalogBackend, MirrorLinks};
use gateway_service::models::record::{Field, Record};
use gateway_service::routes::{create_router, AppState};
use gateway_service::services::proxy::{ContentTypePolicy, DownloadProxy};
use gateway_service::utils::validation::UrlAllowList;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub struct StubCatalog {
    pub records: Vec<Record>,
    pub mirrors: Result<MirrorLinks, String>,
    pub calls: AtomicUsize,
}

impl StubCatalog {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            mirrors: Ok(MirrorLinks::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_mirrors(mut self, mirrors: Result<MirrorLinks, String>) -> Self {
        self.mirrors = mirrors;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogBackend for StubCatalog {
    async fn search_by_title(&self, _query: &str) -> Result<Vec<Record>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }

    async fn search_by_author(&self, _query: &str) -> Result<Vec<Record>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }

    async fn resolve_download_links(&self, _record: &Record) -> Result<MirrorLinks, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.mirrors.clone().map_err(BackendError::Other)
    }
}

pub fn book(id: &str, title: &str, author: &str, language: &str) -> Record {
    [
        (Field::Id, id),
        (Field::Title, title),
        (Field::Author, author),
        (Field::Language, language),
        (Field::Extension, "pdf"),
    ]
    .into_iter()
    .collect()
}

pub fn sample_books() -> Vec<Record> {
    vec![
        book("1", "Dune", "Frank Herbert", "English"),
        book("2", "Dune", "Frank Herbert", "French"),
        book("3", "Dune Messiah", "Frank Herbert", "English"),
    ]
}

pub fn proxy(allow_list: Option<UrlAllowList>, policy: ContentTypePolicy) -> DownloadProxy {
    DownloadProxy::new(
        reqwest::Client::new(),
        allow_list,
        policy,
        Duration::from_secs(5),
    )
}

pub fn app(catalog: Arc<StubCatalog>, proxy: DownloadProxy) -> Router {
    create_router(AppState::new(catalog, proxy))
}

pub fn app_with_default_proxy(catalog: Arc<StubCatalog>) -> Router {
    app(
        catalog,
        proxy(Some(UrlAllowList::default()), ContentTypePolicy::PassThrough),
    )
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, headers, body.to_vec())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub fn post_json(uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .expect("valid request")
}

pub fn detail(body: &[u8]) -> String {
    let value: serde_json::Value = serde_json::from_slice(body).expect("error body is JSON");
    value["detail"]
        .as_str()
        .expect("error body has a detail string")
        .to_string()
}
