use crate::parse::{format_link_list, parse_bytes, parse_count, parse_link_list, size_to_bytes};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::debug;

/// 原始字段列, 导出时的顺序
pub const RECORD_COLUMNS: [&str; 17] = [
    "Task",
    "Dataset ID",
    "Likes",
    "Downloads",
    "Last Modified",
    "License",
    "Models",
    "Spaces",
    "DOIs",
    "Size of downloaded files",
    "Size of downloaded files in bytes",
    "Size of Parquet files",
    "Size of Parquet files in bytes",
    "Number of Rows",
    "ArXiv Paper",
    "ACL Paper",
    "README file",
];

/// 采集时附带的 README 质量列, 不参与评价导出
pub const QUALITY_COLUMNS: [&str; 2] = ["README Quality Level", "README Quality Score"];

/// Sentinel the acquisition layer writes when a value could not be determined.
pub const NONE_SENTINEL: &str = "none";

/// One dataset's metadata snapshot, as produced by the acquisition layer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatasetRecord {
    #[serde(rename = "Task", deserialize_with = "text")]
    pub task: Option<String>,
    #[serde(rename = "Dataset ID")]
    pub dataset_id: String,
    #[serde(rename = "Likes", deserialize_with = "count")]
    pub likes: Option<i64>,
    #[serde(rename = "Downloads", deserialize_with = "count")]
    pub downloads: Option<i64>,
    #[serde(rename = "Last Modified", deserialize_with = "text")]
    pub last_modified: Option<String>,
    #[serde(rename = "License", deserialize_with = "text")]
    pub license: Option<String>,
    #[serde(rename = "Models", deserialize_with = "count")]
    pub models: Option<i64>,
    #[serde(rename = "Spaces", deserialize_with = "count")]
    pub spaces: Option<i64>,
    #[serde(rename = "DOIs", deserialize_with = "text")]
    pub dois: Option<String>,
    #[serde(rename = "Size of downloaded files", deserialize_with = "text")]
    pub downloaded_size: Option<String>,
    #[serde(rename = "Size of downloaded files in bytes", deserialize_with = "bytes")]
    pub downloaded_bytes: Option<f64>,
    #[serde(rename = "Size of Parquet files", deserialize_with = "text")]
    pub parquet_size: Option<String>,
    #[serde(rename = "Size of Parquet files in bytes", deserialize_with = "bytes")]
    pub parquet_bytes: Option<f64>,
    #[serde(rename = "Number of Rows", deserialize_with = "count")]
    pub rows: Option<i64>,
    #[serde(rename = "ArXiv Paper", deserialize_with = "text")]
    pub arxiv_paper: Option<String>,
    #[serde(rename = "ACL Paper", deserialize_with = "links")]
    pub acl_papers: Vec<String>,
    #[serde(rename = "README file", deserialize_with = "text")]
    pub readme: Option<String>,
    #[serde(rename = "README Quality Level", deserialize_with = "text")]
    pub readme_quality_level: Option<String>,
    #[serde(rename = "README Quality Score", deserialize_with = "score")]
    pub readme_quality_score: Option<u32>,
}

impl DatasetRecord {
    pub fn new(dataset_id: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            ..Default::default()
        }
    }

    /// README text, `None` when absent or the "none" sentinel.
    pub fn readme_text(&self) -> Option<&str> {
        present(&self.readme)
    }

    pub fn arxiv_link(&self) -> Option<&str> {
        present(&self.arxiv_paper)
    }

    pub fn doi(&self) -> Option<&str> {
        present(&self.dois)
    }

    /// License keeps "none" as a value: it is evidence of a missing license, not missing data.
    pub fn license_name(&self) -> Option<&str> {
        self.license
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// 只有可读大小而没有字节数时, 从可读大小推算
    pub fn fill_derived_sizes(&mut self) {
        if self.downloaded_bytes.is_none() {
            self.downloaded_bytes = derive_bytes(&self.dataset_id, &self.downloaded_size);
        }
        if self.parquet_bytes.is_none() {
            self.parquet_bytes = derive_bytes(&self.dataset_id, &self.parquet_size);
        }
    }

    /// Field values in `RECORD_COLUMNS` order; `None` is written as an empty cell.
    pub fn to_fields(&self) -> Vec<Option<String>> {
        vec![
            self.task.clone(),
            Some(self.dataset_id.clone()),
            self.likes.map(|v| v.to_string()),
            self.downloads.map(|v| v.to_string()),
            self.last_modified.clone(),
            self.license.clone(),
            self.models.map(|v| v.to_string()),
            self.spaces.map(|v| v.to_string()),
            self.dois.clone(),
            self.downloaded_size.clone(),
            self.downloaded_bytes.map(|v| v.to_string()),
            self.parquet_size.clone(),
            self.parquet_bytes.map(|v| v.to_string()),
            self.rows.map(|v| v.to_string()),
            self.arxiv_paper.clone(),
            Some(format_link_list(&self.acl_papers)),
            self.readme.clone(),
        ]
    }

    /// `to_fields` followed by the `QUALITY_COLUMNS` values.
    pub fn to_collected_fields(&self) -> Vec<Option<String>> {
        let mut fields = self.to_fields();
        fields.push(self.readme_quality_level.clone());
        fields.push(self.readme_quality_score.map(|v| v.to_string()));
        fields
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(NONE_SENTINEL))
}

fn derive_bytes(dataset_id: &str, size: &Option<String>) -> Option<f64> {
    let size = size.as_deref()?;
    match size_to_bytes(size) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!("{}: {}", dataset_id, e);
            None
        }
    }
}

fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.as_deref().and_then(parse_count))
}

fn score<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value
        .as_deref()
        .and_then(parse_count)
        .and_then(|v| u32::try_from(v).ok()))
}

fn bytes<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.as_deref().and_then(parse_bytes))
}

fn links<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.as_deref().map(parse_link_list).unwrap_or_default())
}

/// 读取采集结果 CSV, 未知列忽略, 缺失列取默认值
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<DatasetRecord>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let mut record: DatasetRecord = row?;
        record.fill_derived_sizes();
        records.push(record);
    }
    Ok(records)
}

pub fn write_records(path: impl AsRef<Path>, records: &[DatasetRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(RECORD_COLUMNS.iter().chain(QUALITY_COLUMNS.iter()))?;
    for record in records {
        writer.write_record(record.to_collected_fields().iter().map(|f| f.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}
