use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    QualityScore, SearchAdapter, SearchError, SearchOutcome, SearchResult, SearchSource, endpoint,
    keep_well_formed, truncate_description,
};
use crate::config::SearchConfig;

/// Web检索摘要截断长度
pub const SNIPPET_LIMIT: usize = 150;

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
    include_raw_content: bool,
    include_images: bool,
}

/// Tavily Web检索
#[derive(Debug, Clone)]
pub struct TavilyAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    max_results: usize,
}

impl TavilyAdapter {
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            base_url: config.tavily_base_url.clone(),
            api_key: config.api_key.clone(),
            max_results: config.max_results,
        }
    }

    /// 指定返回条数的检索，供可信域名检索复用
    pub async fn search_with_limit(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let url = endpoint(&self.base_url, "/search", &[])?;
        let payload = TavilyRequest {
            query,
            max_results,
            search_depth: "advanced",
            include_raw_content: false,
            include_images: false,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        let body: Value = response.json().await?;
        Ok(keep_well_formed(parse_results(&body)?, max_results))
    }
}

/// 解析 Tavily `/search` 的返回体
pub fn parse_results(body: &Value) -> Result<Vec<SearchResult>, SearchError> {
    let items = body
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::Malformed("missing `results` array".to_string()))?;

    Ok(items
        .iter()
        .filter_map(|item| {
            let url = item.get("url")?.as_str()?.to_string();
            let title = item
                .get("title")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or("No Title")
                .to_string();
            let score = item
                .get("score")
                .and_then(Value::as_f64)
                .map(QualityScore::from_unit)
                .unwrap_or(QualityScore::Band { low: 5, high: 7 });
            Some(SearchResult {
                title,
                url,
                description: truncate_description(
                    item.get("content").and_then(Value::as_str),
                    SNIPPET_LIMIT,
                ),
                score,
                detail: None,
            })
        })
        .collect())
}

#[async_trait]
impl SearchAdapter for TavilyAdapter {
    fn source(&self) -> SearchSource {
        SearchSource::Web
    }

    async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::failed(SearchError::EmptyQuery, None);
        }

        match self.search_with_limit(query, self.max_results).await {
            Ok(results) => {
                debug!(query, count = results.len(), "web search finished");
                SearchOutcome::Found(results)
            }
            Err(error) => {
                // Web检索没有通用的兜底页面，失败时返回空结果
                warn!(query, %error, "web search failed");
                SearchOutcome::failed(error, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_results() {
        let body = json!({
            "query": "acme retail market size",
            "results": [
                {
                    "title": "Acme Retail posts record revenue",
                    "url": "https://www.reuters.com/business/acme",
                    "content": "Acme Retail reported revenue of $12B for fiscal 2024.",
                    "score": 0.91
                },
                { "url": "https://example.com/untitled", "content": "" },
                { "title": "No url" }
            ]
        });

        let results = parse_results(&body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].score, QualityScore::Rated(9));
        assert_eq!(results[1].title, "No Title");
        assert_eq!(results[1].description, "No description");
    }

    #[test]
    fn test_parse_results_malformed() {
        assert!(parse_results(&json!({ "detail": "Unauthorized" })).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_failure_without_fallback() {
        let config = SearchConfig {
            api_key: "test".to_string(),
            tavily_base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 2,
            ..Default::default()
        };
        let client = crate::search::build_http_client(&config).unwrap();
        let adapter = TavilyAdapter::new(client, &config);

        let outcome = adapter.search("acme retail").await;
        assert!(outcome.is_failure());
        assert!(outcome.into_results().is_empty());
    }
}
