use crate::error::ApiError;
use crate::models::requests::DownloadParams;
use crate::routes::AppState;
use crate::services::proxy::{ProxiedFile, DEFAULT_CONTENT_TYPE};
use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

const FALLBACK_DISPOSITION: &str = "attachment; filename=\"download\"";

pub async fn download_file(
    params: Result<Query<DownloadParams>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let file = state.proxy.fetch(&params.file_url).await?;
    Ok(file_response(file))
}

fn file_response(file: ProxiedFile) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&file.content_type)
            .unwrap_or(HeaderValue::from_static(DEFAULT_CONTENT_TYPE)),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&content_disposition(&file.filename))
            .unwrap_or(HeaderValue::from_static(FALLBACK_DISPOSITION)),
    );
    if let Some(length) = file.content_length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    }
    (StatusCode::OK, headers, Body::from_stream(file.body)).into_response()
}

/// `filename` carries an ASCII stand-in; non-ASCII names also get an RFC 6266 `filename*`.
fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        urlencoding::encode(filename)
    )
}
