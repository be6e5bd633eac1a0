use model::hub::{DatasetSize, HubDataset, HubDatasetInfo, HubErrorResponse, RepoSummary, SizeResponse};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, LINK};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// 数据集平台访问配置
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HubConfig {
    pub endpoint: String,
    pub datasets_server: String,
    pub language: String,
    pub token: Option<String>,
    pub concurrency: usize,
    pub timeout_secs: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://huggingface.co".to_owned(),
            datasets_server: "https://datasets-server.huggingface.co".to_owned(),
            language: "ar".to_owned(),
            token: None,
            concurrency: 8,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Error)]
pub enum HubError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("{url} returned {status}: {message}")]
    Status {
        url: String,
        status: StatusCode,
        message: String,
    },
    #[error("invalid access token")]
    InvalidToken,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, HubError>;

#[derive(Clone)]
pub struct HubClient {
    client: reqwest::Client,
    config: HubConfig,
}

impl HubClient {
    pub fn new(config: HubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| HubError::InvalidToken)?;
            headers.insert(AUTHORIZATION, value);
        }
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// 按语言列出数据集, 可选按任务类别过滤
    pub async fn list_datasets(&self, task_category: Option<&str>) -> Result<Vec<HubDataset>> {
        let mut query = vec![
            ("filter", format!("language:{}", self.config.language)),
            ("full", "true".to_owned()),
        ];
        if let Some(task) = task_category {
            query.push(("filter", format!("task_categories:{}", task)));
        }
        self.get_paginated(&format!("{}/api/datasets", self.config.endpoint), &query)
            .await
    }

    pub async fn dataset_tags(&self, dataset_id: &str) -> Result<Vec<String>> {
        let url = format!("{}/api/datasets/{}", self.config.endpoint, dataset_id);
        let info: HubDatasetInfo = self.get_json(&url, &[]).await?;
        Ok(info.tags)
    }

    pub async fn count_models(&self, dataset_id: &str) -> Result<i64> {
        let url = format!("{}/api/models", self.config.endpoint);
        let models: Vec<RepoSummary> = self
            .get_paginated(&url, &[("filter", format!("dataset:{}", dataset_id))])
            .await?;
        Ok(models.len() as i64)
    }

    pub async fn count_spaces(&self, dataset_id: &str) -> Result<i64> {
        let url = format!("{}/api/spaces", self.config.endpoint);
        let spaces: Vec<RepoSummary> = self
            .get_paginated(&url, &[("datasets", dataset_id.to_owned())])
            .await?;
        Ok(spaces.len() as i64)
    }

    pub async fn readme(&self, dataset_id: &str) -> Result<String> {
        let url = format!(
            "{}/datasets/{}/resolve/main/README.md",
            self.config.endpoint, dataset_id
        );
        let resp = self.send(&url, &[]).await?;
        Ok(resp.text().await?)
    }

    pub async fn dataset_size(&self, dataset_id: &str) -> Result<DatasetSize> {
        let url = format!("{}/size", self.config.datasets_server);
        let resp: SizeResponse = self
            .get_json(&url, &[("dataset", dataset_id.to_owned())])
            .await?;
        Ok(resp.size.dataset)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let resp = self.send(url, query).await?;
        Ok(resp.json::<T>().await?)
    }

    // 列表接口通过 Link 头分页
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut resp = self.send(url, query).await?;
        loop {
            let next = resp
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_page_url);
            let page: Vec<T> = resp.json().await?;
            items.extend(page);
            match next {
                Some(next) => {
                    debug!("following page {}", next);
                    resp = self.send(&next, &[]).await?;
                }
                None => break,
            }
        }
        Ok(items)
    }

    async fn send(&self, url: &str, query: &[(&str, String)]) -> Result<Response> {
        let resp = self.client.get(url).query(query).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<HubErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or(body);
        Err(match status {
            StatusCode::NOT_FOUND => HubError::NotFound(url.to_owned()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                HubError::Unauthorized(url.to_owned())
            }
            _ => HubError::Status {
                url: url.to_owned(),
                status,
                message,
            },
        })
    }
}

/// 解析 `Link: <url>; rel="next"`
pub fn next_page_url(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        if !params.contains("rel=\"next\"") {
            return None;
        }
        let target = target.trim();
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_owned)
    })
}
