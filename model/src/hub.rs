use crate::dataset::{DatasetRecord, NONE_SENTINEL};
use serde::{Deserialize, Serialize};

const ARXIV_ABS_URL: &str = "https://arxiv.org/abs/";

// 数据集列表接口返回的条目
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HubDataset {
    pub id: String,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub downloads: Option<i64>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl HubDataset {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// 第一个包含 `license` 的标签, 取最后一个冒号之后的部分
    pub fn license(&self) -> Option<String> {
        license_from_tags(&self.tags)
    }

    pub fn arxiv_link(&self) -> Option<String> {
        arxiv_from_tags(&self.tags)
    }

    pub fn doi(&self) -> Option<String> {
        doi_from_tags(&self.tags)
    }
}

pub fn license_from_tags(tags: &[String]) -> Option<String> {
    tags.iter()
        .find(|t| t.contains("license"))
        .and_then(|t| t.rsplit(':').next())
        .map(str::to_owned)
}

pub fn arxiv_from_tags(tags: &[String]) -> Option<String> {
    tags.iter()
        .find_map(|t| t.strip_prefix("arxiv:"))
        .map(|id| format!("{}{}", ARXIV_ABS_URL, id))
}

pub fn doi_from_tags(tags: &[String]) -> Option<String> {
    tags.iter().find(|t| t.contains("doi")).cloned()
}

// 单个数据集详情, 只关心标签
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct HubDatasetInfo {
    pub id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Entry of a model or space listing; only counted.
#[derive(Debug, Deserialize, Clone)]
pub struct RepoSummary {
    pub id: String,
}

// datasets-server `/size` 接口
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SizeResponse {
    pub size: SizeInfo,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SizeInfo {
    pub dataset: DatasetSize,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DatasetSize {
    #[serde(default)]
    pub num_bytes_original_files: Option<u64>,
    #[serde(default)]
    pub num_bytes_parquet_files: Option<u64>,
    #[serde(default)]
    pub num_rows: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct HubErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

// 转换函数, 只填充列表接口已经给出的字段, 其余字段由采集器补充
impl From<&HubDataset> for DatasetRecord {
    fn from(dataset: &HubDataset) -> Self {
        Self {
            dataset_id: dataset.id.clone(),
            likes: dataset.likes,
            downloads: dataset.downloads,
            last_modified: dataset.last_modified.clone(),
            license: Some(dataset.license().unwrap_or_else(|| NONE_SENTINEL.to_owned())),
            arxiv_paper: Some(
                dataset
                    .arxiv_link()
                    .unwrap_or_else(|| NONE_SENTINEL.to_owned()),
            ),
            dois: Some(dataset.doi().unwrap_or_else(|| NONE_SENTINEL.to_owned())),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HubDataset {
        serde_json::from_str(
            r#"{
                "id": "org/arabic-qa",
                "likes": 12,
                "downloads": 340,
                "lastModified": "2024-11-02T10:00:00.000Z",
                "tags": ["task_categories:question-answering", "language:ar",
                         "license:cc-by-4.0", "arxiv:2401.00001", "doi:10.57967/hf/1234",
                         "modality:text"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_tag_fields() {
        let dataset = sample();
        assert_eq!(dataset.license().as_deref(), Some("cc-by-4.0"));
        assert_eq!(
            dataset.arxiv_link().as_deref(),
            Some("https://arxiv.org/abs/2401.00001")
        );
        assert_eq!(dataset.doi().as_deref(), Some("doi:10.57967/hf/1234"));
        assert!(dataset.has_tag("modality:text"));
    }

    #[test]
    fn test_record_from_hub_dataset_uses_sentinels() {
        let dataset = HubDataset {
            id: "org/bare".to_owned(),
            tags: vec!["language:ar".to_owned()],
            ..Default::default()
        };
        let record = DatasetRecord::from(&dataset);
        assert_eq!(record.license.as_deref(), Some("none"));
        assert_eq!(record.arxiv_paper.as_deref(), Some("none"));
        assert_eq!(record.dois.as_deref(), Some("none"));
        assert_eq!(record.arxiv_link(), None);
    }

    #[test]
    fn test_record_from_hub_dataset() {
        let record = DatasetRecord::from(&sample());
        assert_eq!(record.dataset_id, "org/arabic-qa");
        assert_eq!(record.likes, Some(12));
        assert_eq!(record.downloads, Some(340));
        assert_eq!(record.license_name(), Some("cc-by-4.0"));
    }

    #[test]
    fn test_size_response() {
        let response: SizeResponse = serde_json::from_str(
            r#"{"size": {"dataset": {"dataset": "org/a", "num_bytes_original_files": 2048,
                "num_bytes_parquet_files": 1024, "num_rows": 10}}, "partial": false}"#,
        )
        .unwrap();
        assert_eq!(response.size.dataset.num_rows, Some(10));
        assert_eq!(response.size.dataset.num_bytes_parquet_files, Some(1024));
    }
}
