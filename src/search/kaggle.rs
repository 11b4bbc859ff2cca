use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    DESCRIPTION_LIMIT, QualityScore, SearchAdapter, SearchError, SearchOutcome, SearchResult,
    SearchSource, endpoint, keep_well_formed, truncate_description,
};
use crate::config::SearchConfig;

const KAGGLE_DEFAULT_SCORE: QualityScore = QualityScore::Band { low: 7, high: 9 };

/// Kaggle数据集检索
///
/// Kaggle API 需要账号凭据；未配置时请求大概率被拒绝，会退化为网页检索链接。
#[derive(Debug, Clone)]
pub struct KaggleAdapter {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
    limit: usize,
}

impl KaggleAdapter {
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        let credentials = match (&config.kaggle_username, &config.kaggle_key) {
            (Some(user), Some(key)) => Some((user.clone(), key.clone())),
            _ => None,
        };
        Self {
            client,
            base_url: config.kaggle_base_url.clone(),
            credentials,
            limit: config.per_source_limit,
        }
    }

    pub fn fallback(query: &str) -> Option<SearchResult> {
        let url = endpoint("https://www.kaggle.com", "/datasets", &[("search", query)]).ok()?;
        Some(SearchResult {
            title: format!("Kaggle {} Datasets", query),
            url: url.to_string(),
            description: format!("Community datasets for {}", query),
            score: KAGGLE_DEFAULT_SCORE,
            detail: None,
        })
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let url = endpoint(&self.base_url, "/api/v1/datasets/list", &[("search", query)])?;

        let mut request = self.client.get(url);
        if let Some((user, key)) = &self.credentials {
            request = request.basic_auth(user, Some(key));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        let body: Value = response.json().await?;
        Ok(keep_well_formed(parse_datasets(&body)?, self.limit))
    }
}

/// 解析 `/api/v1/datasets/list` 的返回体
pub fn parse_datasets(body: &Value) -> Result<Vec<SearchResult>, SearchError> {
    let items = body
        .as_array()
        .ok_or_else(|| SearchError::Malformed("expected an array of datasets".to_string()))?;

    Ok(items
        .iter()
        .filter_map(|item| {
            let title = item.get("title")?.as_str()?.trim().to_string();
            let reference = item.get("ref")?.as_str()?.trim();
            let score = item
                .get("usabilityRating")
                .and_then(Value::as_f64)
                .map(QualityScore::from_unit)
                .unwrap_or(KAGGLE_DEFAULT_SCORE);
            let size = item
                .get("totalBytes")
                .and_then(Value::as_u64)
                .map(format_bytes)
                .or_else(|| item.get("size").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| "Unknown".to_string());
            let license = item
                .get("licenseName")
                .and_then(Value::as_str)
                .unwrap_or("N/A");
            Some(SearchResult {
                title,
                url: format!("https://www.kaggle.com/datasets/{}", reference),
                description: truncate_description(
                    item.get("subtitle").and_then(Value::as_str),
                    DESCRIPTION_LIMIT,
                ),
                score,
                detail: Some(format!("Size: {} - {}", size, license)),
            })
        })
        .collect())
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[async_trait]
impl SearchAdapter for KaggleAdapter {
    fn source(&self) -> SearchSource {
        SearchSource::Kaggle
    }

    async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::failed(SearchError::EmptyQuery, None);
        }

        match self.fetch(query).await {
            Ok(results) => {
                debug!(query, count = results.len(), "kaggle search finished");
                SearchOutcome::Found(results)
            }
            Err(error) => {
                warn!(query, %error, "kaggle search degraded to fallback");
                SearchOutcome::failed(error, Self::fallback(query))
            }
        }
    }
}
