//! 可信域名检索
//!
//! 对白名单中的每个域名发起一次 `site:<domain> <query>` 检索，按白名单顺序拼接命中结果。

use futures::future::join_all;
use tracing::{info, warn};

use super::{SearchResult, TavilyAdapter};
use crate::config::SearchConfig;

pub const NO_TRUSTED_RESULTS: &str = "⚠️ No results found even on trusted domains.";

/// 可信检索结果
#[derive(Debug, Clone, PartialEq)]
pub enum TrustedOutcome {
    /// 至少一个域名有命中，元素为 (域名, 结果)
    Hits(Vec<(String, SearchResult)>),
    /// 所有域名都失败或没有命中
    NoTrustedResults,
}

impl TrustedOutcome {
    pub fn render(&self) -> String {
        match self {
            TrustedOutcome::NoTrustedResults => NO_TRUSTED_RESULTS.to_string(),
            TrustedOutcome::Hits(hits) => {
                let mut output = String::from("### Trusted Results:\n\n");
                for (domain, result) in hits {
                    output.push_str(&format!(
                        "- **[{}]({})** ({})\n  - {}\n\n",
                        result.title, result.url, domain, result.description
                    ));
                }
                output
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrustedSearch {
    web: TavilyAdapter,
    domains: Vec<String>,
    per_domain: usize,
}

impl TrustedSearch {
    pub fn new(web: TavilyAdapter, config: &SearchConfig) -> Self {
        Self {
            web,
            domains: config.trusted_domains.clone(),
            per_domain: config.trusted_results_per_domain,
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub async fn search(&self, query: &str) -> TrustedOutcome {
        let query = query.trim();
        if query.is_empty() {
            return TrustedOutcome::NoTrustedResults;
        }

        let sub_queries = self.domains.iter().map(|domain| async move {
            let scoped = format!("site:{} {}", domain, query);
            (domain, self.web.search_with_limit(&scoped, self.per_domain).await)
        });

        let mut hits = Vec::new();
        for (domain, outcome) in join_all(sub_queries).await {
            match outcome {
                Ok(results) => {
                    hits.extend(results.into_iter().map(|r| (domain.clone(), r)));
                }
                Err(error) => warn!(%domain, %error, "trusted sub-query failed"),
            }
        }

        info!(query, hits = hits.len(), "trusted search finished");
        if hits.is_empty() {
            TrustedOutcome::NoTrustedResults
        } else {
            TrustedOutcome::Hits(hits)
        }
    }
}
