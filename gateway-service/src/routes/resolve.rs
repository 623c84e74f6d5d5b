use crate::error::ApiError;
use crate::models::catalog::MirrorLinks;
use crate::models::record::Record;
use crate::routes::AppState;
use crate::services::resolver::resolve_links;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

pub async fn resolve_download_links(
    State(state): State<AppState>,
    record: Result<Json<Record>, JsonRejection>,
) -> Result<Json<MirrorLinks>, ApiError> {
    let Json(record) = record?;
    let links = resolve_links(state.backend.as_ref(), &record).await?;
    Ok(Json(links))
}
