use crate::client::{HubClient, HubError};
use futures::stream::{self, StreamExt};
use model::dataset::NONE_SENTINEL;
use model::hub::doi_from_tags;
use model::DatasetRecord;
use tracing::{info, warn};

struct Lookup {
    index: usize,
    spaces: Option<i64>,
    doi: Option<String>,
}

/// 补齐从文件读入的记录中缺失的 Spaces 和 DOIs
pub async fn enrich_records(client: &HubClient, records: &mut [DatasetRecord]) -> usize {
    let pending: Vec<(usize, String, bool, bool)> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.dataset_id.is_empty() && (r.spaces.is_none() || r.dois.is_none()))
        .map(|(i, r)| (i, r.dataset_id.clone(), r.spaces.is_none(), r.dois.is_none()))
        .collect();
    if pending.is_empty() {
        return 0;
    }
    info!("Looking up spaces and DOIs for {} datasets", pending.len());

    let lookups: Vec<Lookup> = stream::iter(pending)
        .map(|(index, id, need_spaces, need_doi)| async move {
            let spaces = if need_spaces {
                client
                    .count_spaces(&id)
                    .await
                    .map_err(|e| warn!("Failed to count spaces for {}: {}", id, e))
                    .ok()
            } else {
                None
            };
            let doi = if need_doi {
                match client.dataset_tags(&id).await {
                    Ok(tags) => Some(doi_from_tags(&tags).unwrap_or_else(|| NONE_SENTINEL.to_owned())),
                    Err(HubError::NotFound(_)) | Err(HubError::Unauthorized(_)) => {
                        warn!("Skipping DOI for {} (not found or private)", id);
                        None
                    }
                    Err(e) => {
                        warn!("Failed to get DOI for {}: {}", id, e);
                        None
                    }
                }
            } else {
                None
            };
            Lookup { index, spaces, doi }
        })
        .buffer_unordered(client.config().concurrency.max(1))
        .collect()
        .await;

    let updated = lookups.len();
    for lookup in lookups {
        let record = &mut records[lookup.index];
        if lookup.spaces.is_some() {
            record.spaces = lookup.spaces;
        }
        if lookup.doi.is_some() {
            record.dois = lookup.doi;
        }
    }
    updated
}
