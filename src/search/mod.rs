//! 外部检索适配器
//!
//! 每个适配器只负责一个外部数据源：发起一次带超时的请求，把返回内容归一化为
//! [`SearchResult`]。适配器从不向上抛错，失败时返回 [`SearchOutcome::Failed`]，
//! 其中保留失败原因以及可选的兜底检索链接。

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SearchConfig;

pub mod aggregator;
pub mod github;
pub mod huggingface;
pub mod kaggle;
pub mod tavily;
pub mod trusted;

pub use aggregator::{AggregatedResults, DatasetSearch};
pub use github::GitHubAdapter;
pub use huggingface::HuggingFaceAdapter;
pub use kaggle::KaggleAdapter;
pub use tavily::TavilyAdapter;
pub use trusted::{TrustedOutcome, TrustedSearch};

const USER_AGENT: &str = concat!("synapse-rs/", env!("CARGO_PKG_VERSION"));

/// 描述截断长度（字符）
pub const DESCRIPTION_LIMIT: usize = 100;

/// 数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SearchSource {
    Web,
    Kaggle,
    HuggingFace,
    GitHub,
}

impl std::fmt::Display for SearchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchSource::Web => write!(f, "Web"),
            SearchSource::Kaggle => write!(f, "Kaggle"),
            SearchSource::HuggingFace => write!(f, "HuggingFace"),
            SearchSource::GitHub => write!(f, "GitHub"),
        }
    }
}

/// 质量/热度评分，统一为 10 分制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityScore {
    /// 单一评分，例如按 star 数折算
    Rated(u8),
    /// 经验区间，例如 `8-10/10`
    Band { low: u8, high: u8 },
}

impl QualityScore {
    /// 把 0..=1 的相关度/可用度折算为 1..=10
    pub fn from_unit(value: f64) -> Self {
        let rated = (value * 10.0).round().clamp(1.0, 10.0);
        QualityScore::Rated(rated as u8)
    }

    /// GitHub star 数折算：每 100 star 一分，限定在 1..=10
    pub fn from_stars(stars: u64) -> Self {
        QualityScore::Rated((stars / 100).clamp(1, 10) as u8)
    }
}

impl std::fmt::Display for QualityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityScore::Rated(score) => write!(f, "{}/10", score),
            QualityScore::Band { low, high } => write!(f, "{}-{}/10", low, high),
        }
    }
}

/// 归一化的检索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
    pub score: QualityScore,
    /// 来源相关的补充信息，例如 star 数、数据集大小与许可证
    pub detail: Option<String>,
}

impl SearchResult {
    /// 去重键：标题与链接均忽略大小写
    pub fn dedup_key(&self) -> (String, String) {
        (self.title.to_lowercase(), self.url.to_lowercase())
    }

    /// 标题非空且链接可解析
    pub fn is_well_formed(&self) -> bool {
        !self.title.trim().is_empty() && Url::parse(&self.url).is_ok()
    }
}

/// 适配器失败原因
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("query is empty")]
    EmptyQuery,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

/// 一次适配器调用的结果
#[derive(Debug)]
pub enum SearchOutcome {
    /// 调用成功，结果可能为空
    Found(Vec<SearchResult>),
    /// 调用失败，可选地带一条指向通用检索页面的兜底结果
    Failed {
        error: SearchError,
        fallback: Option<SearchResult>,
    },
}

impl SearchOutcome {
    pub fn failed(error: SearchError, fallback: Option<SearchResult>) -> Self {
        SearchOutcome::Failed { error, fallback }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SearchOutcome::Failed { .. })
    }

    pub fn failure_reason(&self) -> Option<String> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Failed { error, .. } => Some(error.to_string()),
        }
    }

    /// 渲染视角下的结果：失败时折叠为兜底结果（若有）
    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            SearchOutcome::Found(results) => results,
            SearchOutcome::Failed { fallback, .. } => fallback.into_iter().collect(),
        }
    }
}

/// 单一数据源的检索适配器
#[async_trait]
pub trait SearchAdapter: Send + Sync {
    fn source(&self) -> SearchSource;

    async fn search(&self, query: &str) -> SearchOutcome;
}

/// 构建检索共用的HTTP客户端
pub fn build_http_client(config: &SearchConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENT)
        .build()
}

/// 拼接基地址与路径，并附带查询参数
pub(crate) fn endpoint(
    base_url: &str,
    path: &str,
    params: &[(&str, &str)],
) -> Result<Url, SearchError> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), path);
    let parsed = if params.is_empty() {
        Url::parse(&raw)
    } else {
        Url::parse_with_params(&raw, params)
    };
    parsed.map_err(|e| SearchError::Endpoint(format!("{raw}: {e}")))
}

/// 按字符截断描述，超出时追加省略号；空描述替换为占位文本
pub fn truncate_description(text: Option<&str>, limit: usize) -> String {
    let text = text.map(str::trim).filter(|t| !t.is_empty());
    match text {
        None => "No description".to_string(),
        Some(text) if text.chars().count() <= limit => text.to_string(),
        Some(text) => {
            let truncated: String = text.chars().take(limit).collect();
            format!("{}...", truncated.trim_end())
        }
    }
}

/// 过滤掉不合格的结果并截取前 `limit` 条
pub(crate) fn keep_well_formed(results: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(SearchResult::is_well_formed)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, url: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: url.to_string(),
            description: "d".to_string(),
            score: QualityScore::Rated(5),
            detail: None,
        }
    }

    #[test]
    fn test_quality_score_display() {
        assert_eq!(QualityScore::Rated(7).to_string(), "7/10");
        assert_eq!(QualityScore::Band { low: 8, high: 10 }.to_string(), "8-10/10");
    }

    #[test]
    fn test_quality_score_from_stars_is_clamped() {
        assert_eq!(QualityScore::from_stars(0), QualityScore::Rated(1));
        assert_eq!(QualityScore::from_stars(450), QualityScore::Rated(4));
        assert_eq!(QualityScore::from_stars(250_000), QualityScore::Rated(10));
    }

    #[test]
    fn test_quality_score_from_unit() {
        assert_eq!(QualityScore::from_unit(0.0), QualityScore::Rated(1));
        assert_eq!(QualityScore::from_unit(0.84), QualityScore::Rated(8));
        assert_eq!(QualityScore::from_unit(1.7), QualityScore::Rated(10));
    }

    #[test]
    fn test_dedup_key_ignores_case() {
        let a = result("Retail Sales", "https://Example.com/A");
        let b = result("RETAIL sales", "https://example.com/a");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_well_formed() {
        assert!(result("t", "https://example.com").is_well_formed());
        assert!(!result("  ", "https://example.com").is_well_formed());
        assert!(!result("t", "not a url").is_well_formed());
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description(None, 10), "No description");
        assert_eq!(truncate_description(Some("   "), 10), "No description");
        assert_eq!(truncate_description(Some("short"), 10), "short");
        assert_eq!(
            truncate_description(Some("abcdefghijklmnop"), 10),
            "abcdefghij..."
        );
        // 多字节字符按字符截断
        assert_eq!(truncate_description(Some("数据集数据集"), 3), "数据集...");
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let url = endpoint("https://api.github.com/", "/search/repositories", &[
            ("q", "retail demand dataset"),
            ("sort", "stars"),
        ])
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/search/repositories?q=retail+demand+dataset&sort=stars"
        );
    }

    #[test]
    fn test_outcome_collapses_to_fallback() {
        let outcome = SearchOutcome::failed(
            SearchError::Status(503),
            Some(result("fallback", "https://example.com/search")),
        );
        assert!(outcome.is_failure());
        assert_eq!(outcome.failure_reason().as_deref(), Some("unexpected status 503"));
        assert_eq!(outcome.into_results().len(), 1);

        let empty = SearchOutcome::failed(SearchError::EmptyQuery, None);
        assert!(empty.into_results().is_empty());
    }
}
