use crate::models::catalog::{CatalogBackend, MirrorLinks};
use crate::models::record::{Field, Record};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug, PartialEq, Eq)]
#[error("{0}")]
pub struct ResolutionError(pub String);

pub async fn resolve_links(
    backend: &(dyn CatalogBackend + Send + Sync),
    record: &Record,
) -> Result<MirrorLinks, ResolutionError> {
    let id = record.get(Field::Id).unwrap_or("<no id>");

    match backend.resolve_download_links(record).await {
        Ok(links) => {
            info!("Resolved {} mirror links for record {}", links.len(), id);
            Ok(links)
        }
        Err(e) => {
            error!("Failed to resolve mirror links for record {}: {}", id, e);
            Err(ResolutionError(e.to_string()))
        }
    }
}
