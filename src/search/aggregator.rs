//! 多来源检索结果的合并、去重与渲染

use std::collections::HashSet;
use tracing::warn;

use super::{
    GitHubAdapter, HuggingFaceAdapter, KaggleAdapter, SearchAdapter, SearchOutcome, SearchResult,
    SearchSource,
};

pub const NO_RESULTS: &str = "- No results found";

/// 一次查询在多个来源上的合并结果
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResults {
    heading: String,
    query: String,
    /// 按查询顺序排列，每个来源只出现一次
    sections: Vec<(SearchSource, Vec<SearchResult>)>,
    /// 失败的来源及原因，渲染时不展示
    failures: Vec<(SearchSource, String)>,
}

impl AggregatedResults {
    /// 合并各来源的结果：按来源顺序遍历，同一去重键只保留第一次出现的结果
    pub fn merge(
        heading: impl Into<String>,
        query: impl Into<String>,
        outcomes: Vec<(SearchSource, SearchOutcome)>,
    ) -> Self {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut sections: Vec<(SearchSource, Vec<SearchResult>)> = Vec::new();
        let mut failures = Vec::new();

        for (source, outcome) in outcomes {
            if let Some(reason) = outcome.failure_reason() {
                failures.push((source, reason));
            }

            let unique: Vec<SearchResult> = outcome
                .into_results()
                .into_iter()
                .filter(|result| seen.insert(result.dedup_key()))
                .collect();

            match sections.iter_mut().find(|(s, _)| *s == source) {
                Some((_, existing)) => existing.extend(unique),
                None => sections.push((source, unique)),
            }
        }

        Self {
            heading: heading.into(),
            query: query.into(),
            sections,
            failures,
        }
    }

    pub fn sections(&self) -> &[(SearchSource, Vec<SearchResult>)] {
        &self.sections
    }

    pub fn results_for(&self, source: SearchSource) -> Option<&[SearchResult]> {
        self.sections
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, results)| results.as_slice())
    }

    pub fn failures(&self) -> &[(SearchSource, String)] {
        &self.failures
    }

    pub fn total_results(&self) -> usize {
        self.sections.iter().map(|(_, results)| results.len()).sum()
    }

    /// 渲染为固定格式的markdown，每个来源一个二级标题，空来源输出占位行
    pub fn render(&self) -> String {
        let mut output = format!("# {}: {}\n\n", self.heading, self.query);
        for (source, results) in &self.sections {
            output.push_str(&format!("## {}\n", source));
            if results.is_empty() {
                output.push_str(NO_RESULTS);
                output.push_str("\n\n");
                continue;
            }
            for result in results {
                output.push_str(&format!("- **[{}]({})**\n", result.title, result.url));
                output.push_str(&format!("  - {}\n", result.description));
                if let Some(detail) = &result.detail {
                    output.push_str(&format!("  - {}\n", detail));
                }
                output.push_str(&format!("  - Quality: {}\n\n", result.score));
            }
        }
        output
    }
}

/// 跨 Kaggle / HuggingFace / GitHub 的数据集检索
#[derive(Debug, Clone)]
pub struct DatasetSearch {
    kaggle: KaggleAdapter,
    huggingface: HuggingFaceAdapter,
    github: GitHubAdapter,
}

impl DatasetSearch {
    pub const HEADING: &'static str = "Dataset Search";

    pub fn new(kaggle: KaggleAdapter, huggingface: HuggingFaceAdapter, github: GitHubAdapter) -> Self {
        Self {
            kaggle,
            huggingface,
            github,
        }
    }

    pub async fn search(&self, query: &str) -> AggregatedResults {
        let query = query.trim();
        let github_query = format!("{} dataset", query);

        let (kaggle, huggingface, github) = tokio::join!(
            self.kaggle.search(query),
            self.huggingface.search(query),
            self.github.search(&github_query),
        );

        let aggregated = AggregatedResults::merge(Self::HEADING, query, vec![
            (self.kaggle.source(), kaggle),
            (self.huggingface.source(), huggingface),
            (self.github.source(), github),
        ]);
        for (source, reason) in aggregated.failures() {
            warn!(%source, %reason, "dataset search source degraded");
        }
        aggregated
    }
}
