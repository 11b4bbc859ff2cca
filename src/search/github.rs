use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    DESCRIPTION_LIMIT, QualityScore, SearchAdapter, SearchError, SearchOutcome, SearchResult,
    SearchSource, endpoint, keep_well_formed, truncate_description,
};
use crate::config::SearchConfig;

/// GitHub仓库检索，按 star 数降序
#[derive(Debug, Clone)]
pub struct GitHubAdapter {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    limit: usize,
}

impl GitHubAdapter {
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            base_url: config.github_api_base_url.clone(),
            token: config.github_token.clone(),
            limit: config.per_source_limit,
        }
    }

    /// 失败时给出的GitHub网页检索链接
    pub fn fallback(query: &str) -> Option<SearchResult> {
        let url = endpoint("https://github.com", "/search", &[("q", query)]).ok()?;
        Some(SearchResult {
            title: format!("GitHub {}", query),
            url: url.to_string(),
            description: format!("Code repositories for {}", query),
            score: QualityScore::Band { low: 6, high: 8 },
            detail: None,
        })
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let url = endpoint(&self.base_url, "/search/repositories", &[
            ("q", query),
            ("sort", "stars"),
            ("order", "desc"),
        ])?;

        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        let body: Value = response.json().await?;
        Ok(keep_well_formed(parse_repositories(&body)?, self.limit))
    }
}

/// 解析 `/search/repositories` 的返回体
pub fn parse_repositories(body: &Value) -> Result<Vec<SearchResult>, SearchError> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::Malformed("missing `items` array".to_string()))?;

    Ok(items
        .iter()
        .filter_map(|item| {
            let title = item.get("name")?.as_str()?.trim().to_string();
            let url = item.get("html_url")?.as_str()?.to_string();
            let stars = item
                .get("stargazers_count")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            Some(SearchResult {
                title,
                url,
                description: truncate_description(
                    item.get("description").and_then(Value::as_str),
                    DESCRIPTION_LIMIT,
                ),
                score: QualityScore::from_stars(stars),
                detail: Some(format!("⭐ {}", stars)),
            })
        })
        .collect())
}

#[async_trait]
impl SearchAdapter for GitHubAdapter {
    fn source(&self) -> SearchSource {
        SearchSource::GitHub
    }

    async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::failed(SearchError::EmptyQuery, None);
        }

        match self.fetch(query).await {
            Ok(results) => {
                debug!(query, count = results.len(), "github search finished");
                SearchOutcome::Found(results)
            }
            Err(error) => {
                warn!(query, %error, "github search degraded to fallback");
                SearchOutcome::failed(error, Self::fallback(query))
            }
        }
    }
}
