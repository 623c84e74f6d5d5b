use crate::models::record::Field;
use crate::models::responses::BannerResponse;
use axum::response::Json;

pub const ENDPOINTS: [&str; 8] = [
    "/search/title",
    "/search/author",
    "/search/title/filtered",
    "/search/author/filtered",
    "/resolve",
    "/columns",
    "/download",
    "/status",
];

pub async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Welcome to the catalog gateway. Search the catalog, filter results, resolve mirrors and download files through this service.".to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

pub async fn columns() -> Json<Vec<&'static str>> {
    Json(Field::ALL.iter().map(Field::as_str).collect())
}
