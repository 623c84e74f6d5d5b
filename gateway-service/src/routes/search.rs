use crate::error::ApiError;
use crate::models::record::Record;
use crate::models::requests::{SearchParams, SearchRequest};
use crate::routes::AppState;
use crate::services::filter::compute_effective_mode;
use crate::utils::validation::validate_query;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Json,
};
use tracing::{error, info};

pub async fn search_by_title(
    params: Result<Query<SearchParams>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let Query(params) = params?;
    let query = validate_query(&params.query)?;
    info!("Title search: {:?}", query);

    let results = state.backend.search_by_title(query).await.map_err(|e| {
        error!("Title search for {:?} failed: {}", query, e);
        e
    })?;

    info!("Title search {:?} returned {} records", query, results.len());
    Ok(Json(results))
}

pub async fn search_by_author(
    params: Result<Query<SearchParams>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let Query(params) = params?;
    let query = validate_query(&params.query)?;
    info!("Author search: {:?}", query);

    let results = state.backend.search_by_author(query).await.map_err(|e| {
        error!("Author search for {:?} failed: {}", query, e);
        e
    })?;

    info!("Author search {:?} returned {} records", query, results.len());
    Ok(Json(results))
}

pub async fn search_title_filtered(
    State(state): State<AppState>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let Json(request) = request?;
    let query = validate_query(&request.query)?;
    let filters = request.filters();
    let mode = compute_effective_mode(filters);
    info!(
        "Filtered title search: {:?} with {} filters ({:?})",
        query,
        filters.len(),
        mode
    );

    let results = state
        .backend
        .search_title_filtered(query, filters, mode)
        .await
        .map_err(|e| {
            error!("Filtered title search for {:?} failed: {}", query, e);
            e
        })?;

    Ok(Json(results))
}

pub async fn search_author_filtered(
    State(state): State<AppState>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let Json(request) = request?;
    let query = validate_query(&request.query)?;
    let filters = request.filters();
    let mode = compute_effective_mode(filters);
    info!(
        "Filtered author search: {:?} with {} filters ({:?})",
        query,
        filters.len(),
        mode
    );

    let results = state
        .backend
        .search_author_filtered(query, filters, mode)
        .await
        .map_err(|e| {
            error!("Filtered author search for {:?} failed: {}", query, e);
            e
        })?;

    Ok(Json(results))
}
