use crate::utils::config::Config;
use crate::utils::validation::UrlAllowList;
use axum::body::Bytes;
use futures_util::{Stream, StreamExt, TryStreamExt};
use reqwest::header::CONTENT_TYPE;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};
use uuid::Uuid;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
pub const FALLBACK_FILENAME: &str = "download";
pub const BODY_EXCERPT_CHARS: usize = 512;
// enough bytes for BODY_EXCERPT_CHARS of any UTF-8 text
const BODY_EXCERPT_BYTES: usize = BODY_EXCERPT_CHARS * 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTypePolicy {
    PassThrough,
    Fixed(String),
}

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Invalid download link format.")]
    InvalidDownloadUrl,
    #[error("Error downloading file: {body_excerpt}")]
    UpstreamHttp { status: u16, body_excerpt: String },
    #[error("Error downloading file: {cause}")]
    UpstreamUnreachable { cause: String },
}

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

pub struct ProxiedFile {
    pub filename: String,
    pub content_type: String,
    pub content_length: Option<u64>,
    pub body: ByteStream,
}

impl std::fmt::Debug for ProxiedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxiedFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct DownloadProxy {
    client: reqwest::Client,
    allow_list: Option<UrlAllowList>,
    content_type_policy: ContentTypePolicy,
    timeout: Duration,
}

impl DownloadProxy {
    pub fn new(
        client: reqwest::Client,
        allow_list: Option<UrlAllowList>,
        content_type_policy: ContentTypePolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            allow_list,
            content_type_policy,
            timeout,
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Result<Self, regex::Error> {
        let allow_list = if config.enforce_url_allowlist {
            Some(UrlAllowList::new(&config.download_url_pattern)?)
        } else {
            None
        };

        Ok(Self::new(
            client,
            allow_list,
            config.content_type_policy.clone(),
            config.upstream_timeout,
        ))
    }

    pub fn validate(&self, url: &str) -> Result<(), ProxyError> {
        match &self.allow_list {
            Some(allow_list) if !allow_list.is_allowed(url) => Err(ProxyError::InvalidDownloadUrl),
            _ => Ok(()),
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<ProxiedFile, ProxyError> {
        let download_id = Uuid::new_v4();

        if let Err(e) = self.validate(url) {
            warn!(%download_id, "Rejected download URL {}", url);
            return Err(e);
        }

        info!(%download_id, "Fetching {}", url);

        let deadline = Instant::now() + self.timeout;

        let response = match timeout_at(deadline, self.client.get(url).send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                let cause = transport_cause(&e);
                warn!(%download_id, "Upstream unreachable for {}: {}", url, cause);
                return Err(ProxyError::UpstreamUnreachable { cause });
            }
            Err(_) => {
                warn!(%download_id, "Upstream fetch timed out after {:?}", self.timeout);
                return Err(ProxyError::UpstreamUnreachable {
                    cause: "timeout".to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%download_id, "Upstream answered {} for {}", status, url);
            return Err(ProxyError::UpstreamHttp {
                status: status.as_u16(),
                body_excerpt: read_excerpt(response, deadline).await,
            });
        }

        let content_type = match &self.content_type_policy {
            ContentTypePolicy::PassThrough => response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string(),
            ContentTypePolicy::Fixed(content_type) => content_type.clone(),
        };
        let content_length = response.content_length();
        let filename = filename_from_url(url);

        info!(
            %download_id,
            "Streaming {} ({}, {} bytes)",
            filename,
            content_type,
            content_length.map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );

        // dropping the body drops the upstream response, closing its connection
        let body = response.bytes_stream().map_err(move |e| {
            warn!(%download_id, "Upstream stream failed: {}", e);
            e
        });

        Ok(ProxiedFile {
            filename,
            content_type,
            content_length,
            body: Box::pin(body),
        })
    }
}

/// Final path segment of `url`, percent-decoded, without query string or fragment.
pub fn filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or_default();
    let decoded = urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment));

    let cleaned: String = decoded
        .chars()
        .map(|c| {
            if c == '"' || c == '\\' || c == '/' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned
    }
}

/// Reads at most `BODY_EXCERPT_BYTES` of an error body, stopping early at `deadline`.
async fn read_excerpt(response: reqwest::Response, deadline: Instant) -> String {
    let mut stream = Box::pin(response.bytes_stream());
    let mut buf = Vec::new();

    while buf.len() < BODY_EXCERPT_BYTES {
        match timeout_at(deadline, stream.next()).await {
            Ok(Some(Ok(chunk))) => buf.extend_from_slice(&chunk),
            _ => break,
        }
    }
    buf.truncate(BODY_EXCERPT_BYTES);

    excerpt(&String::from_utf8_lossy(&buf))
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

fn transport_cause(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "timeout".to_string();
    }

    let mut cause = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        // reqwest may already include its source in its own message
        if !cause.contains(&text) {
            cause.push_str(": ");
            cause.push_str(&text);
        }
        source = inner.source();
    }
    cause
}
