use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    DESCRIPTION_LIMIT, QualityScore, SearchAdapter, SearchError, SearchOutcome, SearchResult,
    SearchSource, endpoint, keep_well_formed, truncate_description,
};
use crate::config::SearchConfig;

const HUGGINGFACE_SCORE: QualityScore = QualityScore::Band { low: 8, high: 10 };

/// HuggingFace数据集检索
#[derive(Debug, Clone)]
pub struct HuggingFaceAdapter {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
}

impl HuggingFaceAdapter {
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            base_url: config.huggingface_base_url.clone(),
            limit: config.per_source_limit,
        }
    }

    pub fn fallback(query: &str) -> Option<SearchResult> {
        let url = endpoint("https://huggingface.co", "/datasets", &[("search", query)]).ok()?;
        Some(SearchResult {
            title: format!("HuggingFace {}", query),
            url: url.to_string(),
            description: format!("ML datasets for {}", query),
            score: HUGGINGFACE_SCORE,
            detail: None,
        })
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let limit = self.limit.to_string();
        let url = endpoint(&self.base_url, "/api/datasets", &[
            ("search", query),
            ("limit", limit.as_str()),
        ])?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        let body: Value = response.json().await?;
        Ok(keep_well_formed(parse_datasets(&body)?, self.limit))
    }
}

/// 解析 `/api/datasets` 的返回体（数据集数组）
pub fn parse_datasets(body: &Value) -> Result<Vec<SearchResult>, SearchError> {
    let items = body
        .as_array()
        .ok_or_else(|| SearchError::Malformed("expected an array of datasets".to_string()))?;

    Ok(items
        .iter()
        .filter_map(|item| {
            let id = item.get("id")?.as_str()?.trim();
            if id.is_empty() {
                return None;
            }
            let downloads = item.get("downloads").and_then(Value::as_u64);
            Some(SearchResult {
                title: id.to_string(),
                url: format!("https://huggingface.co/datasets/{}", id),
                description: truncate_description(
                    item.get("description").and_then(Value::as_str),
                    DESCRIPTION_LIMIT,
                ),
                score: HUGGINGFACE_SCORE,
                detail: downloads.map(|d| format!("Downloads: {}", d)),
            })
        })
        .collect())
}

#[async_trait]
impl SearchAdapter for HuggingFaceAdapter {
    fn source(&self) -> SearchSource {
        SearchSource::HuggingFace
    }

    async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::failed(SearchError::EmptyQuery, None);
        }

        match self.fetch(query).await {
            Ok(results) => {
                debug!(query, count = results.len(), "huggingface search finished");
                SearchOutcome::Found(results)
            }
            Err(error) => {
                warn!(query, %error, "huggingface search degraded to fallback");
                SearchOutcome::failed(error, Self::fallback(query))
            }
        }
    }
}
