use crate::client::HubClient;
use futures::stream::{self, StreamExt};
use model::dataset::NONE_SENTINEL;
use model::hub::HubDataset;
use model::parse::{extract_acl_links, format_size};
use model::DatasetRecord;
use serde::Deserialize;
use tracing::{info, warn};

const UNKNOWN: &str = "unknown";

/// 任务类别检索为空时, 按名称关键字检索
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct KeywordSearch {
    pub search_keywords: Vec<String>,
    #[serde(default = "default_modality")]
    pub required_modality: String,
}

fn default_modality() -> String {
    "modality:text".to_owned()
}

impl KeywordSearch {
    pub fn matches(&self, dataset: &HubDataset) -> bool {
        let id = dataset.id.to_lowercase();
        let name_match = self
            .search_keywords
            .iter()
            .any(|k| id.contains(&k.to_lowercase()));
        name_match && dataset.has_tag(&self.required_modality)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionSource {
    TaskCategory,
    KeywordFallback,
}

#[derive(Debug)]
pub struct Collection {
    pub source: CollectionSource,
    pub records: Vec<DatasetRecord>,
}

pub struct CategoryQuery<'a> {
    pub label: &'a str,
    pub task: &'a str,
    pub fallback: Option<&'a KeywordSearch>,
}

pub struct Collector<'a> {
    client: &'a HubClient,
}

impl<'a> Collector<'a> {
    pub fn new(client: &'a HubClient) -> Self {
        Self { client }
    }

    pub async fn collect(&self, query: &CategoryQuery<'_>) -> Collection {
        let datasets = match self.client.list_datasets(Some(query.task)).await {
            Ok(datasets) => datasets,
            Err(e) => {
                warn!("Failed to fetch for task {}: {}", query.label, e);
                Vec::new()
            }
        };

        if datasets.is_empty() {
            if let Some(search) = query.fallback {
                info!(
                    "No data found for category '{}', trying keyword search fallback",
                    query.label
                );
                let records = self.by_keywords(query.label, search).await;
                return Collection {
                    source: CollectionSource::KeywordFallback,
                    records,
                };
            }
        }

        Collection {
            source: CollectionSource::TaskCategory,
            records: self.build_records(query.label, datasets).await,
        }
    }

    async fn by_keywords(&self, label: &str, search: &KeywordSearch) -> Vec<DatasetRecord> {
        let datasets = match self.client.list_datasets(None).await {
            Ok(datasets) => datasets,
            Err(e) => {
                warn!("Failed to list datasets for keyword search: {}", e);
                return Vec::new();
            }
        };
        let matched: Vec<HubDataset> = datasets.into_iter().filter(|d| search.matches(d)).collect();
        self.build_records(label, matched).await
    }

    async fn build_records(&self, label: &str, datasets: Vec<HubDataset>) -> Vec<DatasetRecord> {
        info!("Collecting {} datasets for {}", datasets.len(), label);
        stream::iter(datasets)
            .map(|dataset| self.build_record(label, dataset))
            .buffered(self.client.config().concurrency.max(1))
            .collect()
            .await
    }

    /// 单个数据集的补充查询, 任何一项失败都只影响对应字段
    async fn build_record(&self, label: &str, dataset: HubDataset) -> DatasetRecord {
        let mut record = DatasetRecord::from(&dataset);
        record.task = Some(label.to_owned());
        let id = dataset.id.as_str();

        record.models = match self.client.count_models(id).await {
            Ok(n) => Some(n),
            Err(e) => {
                warn!("Failed to count models for {}: {}", id, e);
                None
            }
        };
        record.spaces = match self.client.count_spaces(id).await {
            Ok(n) => Some(n),
            Err(e) => {
                warn!("Failed to count spaces for {}: {}", id, e);
                None
            }
        };

        match self.client.dataset_size(id).await {
            Ok(size) => {
                record.downloaded_bytes = size.num_bytes_original_files.map(|b| b as f64);
                record.downloaded_size = Some(
                    size.num_bytes_original_files
                        .map(format_size)
                        .unwrap_or_else(|| UNKNOWN.to_owned()),
                );
                record.parquet_bytes = size.num_bytes_parquet_files.map(|b| b as f64);
                record.parquet_size = Some(
                    size.num_bytes_parquet_files
                        .map(format_size)
                        .unwrap_or_else(|| UNKNOWN.to_owned()),
                );
                record.rows = size.num_rows;
            }
            Err(e) => {
                warn!("Error processing size of {}: {}", id, e);
                record.downloaded_size = Some(UNKNOWN.to_owned());
                record.parquet_size = Some(UNKNOWN.to_owned());
            }
        }

        match self.client.readme(id).await {
            Ok(readme) if !readme.is_empty() => {
                record.acl_papers = extract_acl_links(&readme);
                record.readme = Some(readme);
            }
            Ok(_) => record.readme = Some(NONE_SENTINEL.to_owned()),
            Err(e) => {
                warn!("Failed to download README of {}: {}", id, e);
                record.readme = Some(NONE_SENTINEL.to_owned());
            }
        }

        record
    }
}
