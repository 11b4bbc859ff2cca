//! 供Agent调用的检索工具
//!
//! 每个角色通过 [`Capability`] 声明自己可用的工具，构建Agent时只挂载这些工具。

use anyhow::{Context, Result};
use rig::tool::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::search::{
    DatasetSearch, GitHubAdapter, HuggingFaceAdapter, KaggleAdapter, TavilyAdapter, TrustedSearch,
    build_http_client,
};

pub mod dataset_search;
pub mod repository_search;
pub mod web_search;

use dataset_search::{AgentToolDatasetSearch, AgentToolKaggleDatasets};
use repository_search::AgentToolGitHubCode;
use web_search::{AgentToolTrustedSearch, AgentToolWebSearch};

/// 工具能力标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    WebSearch,
    TrustedSearch,
    GitHubCode,
    KaggleDatasets,
    DatasetSearch,
}

impl Capability {
    /// 对应工具在LLM侧的名称
    pub fn tool_name(&self) -> &'static str {
        match self {
            Capability::WebSearch => AgentToolWebSearch::NAME,
            Capability::TrustedSearch => AgentToolTrustedSearch::NAME,
            Capability::GitHubCode => AgentToolGitHubCode::NAME,
            Capability::KaggleDatasets => AgentToolKaggleDatasets::NAME,
            Capability::DatasetSearch => AgentToolDatasetSearch::NAME,
        }
    }

    /// 写入系统提示词的工具说明
    pub fn usage_hint(&self) -> &'static str {
        match self {
            Capability::WebSearch => "general web search for market data, news and company facts",
            Capability::TrustedSearch => {
                "web search restricted to authoritative outlets (Reuters, Bloomberg, FT, WSJ, ...)"
            }
            Capability::GitHubCode => "GitHub repositories sorted by stars",
            Capability::KaggleDatasets => "Kaggle datasets with size and licence",
            Capability::DatasetSearch => {
                "combined, de-duplicated dataset search across Kaggle, HuggingFace and GitHub"
            }
        }
    }
}

/// 工具参数：检索关键词
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// The search query, e.g. "retail demand forecasting"
    pub query: String,
}

impl SearchArgs {
    pub fn parameters_schema() -> serde_json::Value {
        schemars::schema_for!(SearchArgs).to_value()
    }
}

/// 工具调用错误
#[derive(Debug, thiserror::Error)]
pub enum SearchToolError {
    #[error("search query must not be empty")]
    EmptyQuery,
}

/// 全部检索工具实例，按配置构建一次，各阶段共享
#[derive(Debug, Clone)]
pub struct Toolbox {
    pub web_search: AgentToolWebSearch,
    pub trusted_search: AgentToolTrustedSearch,
    pub github_code: AgentToolGitHubCode,
    pub kaggle_datasets: AgentToolKaggleDatasets,
    pub dataset_search: AgentToolDatasetSearch,
}

impl Toolbox {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = build_http_client(config).context("Failed to build search HTTP client")?;

        let tavily = TavilyAdapter::new(client.clone(), config);
        let kaggle = KaggleAdapter::new(client.clone(), config);
        let huggingface = HuggingFaceAdapter::new(client.clone(), config);
        let github = GitHubAdapter::new(client, config);

        Ok(Self {
            trusted_search: AgentToolTrustedSearch::new(TrustedSearch::new(tavily.clone(), config)),
            web_search: AgentToolWebSearch::new(tavily),
            github_code: AgentToolGitHubCode::new(github.clone()),
            kaggle_datasets: AgentToolKaggleDatasets::new(kaggle.clone()),
            dataset_search: AgentToolDatasetSearch::new(DatasetSearch::new(
                kaggle,
                huggingface,
                github,
            )),
        })
    }
}

/// 校验工具参数中的检索关键词
pub(crate) fn require_query(args: &SearchArgs) -> Result<&str, SearchToolError> {
    let query = args.query.trim();
    if query.is_empty() {
        Err(SearchToolError::EmptyQuery)
    } else {
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_are_unique() {
        let all = [
            Capability::WebSearch,
            Capability::TrustedSearch,
            Capability::GitHubCode,
            Capability::KaggleDatasets,
            Capability::DatasetSearch,
        ];
        let names: std::collections::HashSet<_> = all.iter().map(|c| c.tool_name()).collect();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_tool_names_match_tool_definitions() {
        assert_eq!(Capability::WebSearch.tool_name(), "web_search");
        assert_eq!(Capability::TrustedSearch.tool_name(), "trusted_search");
        assert_eq!(Capability::GitHubCode.tool_name(), "github_code_search");
        assert_eq!(Capability::KaggleDatasets.tool_name(), "kaggle_dataset_search");
        assert_eq!(Capability::DatasetSearch.tool_name(), "dataset_search");
    }

    #[tokio::test]
    async fn test_tool_name_matches_advertised_definition() {
        let toolbox = Toolbox::new(&SearchConfig::default()).unwrap();
        let definition = toolbox.github_code.definition(String::new()).await;
        assert_eq!(definition.name, Capability::GitHubCode.tool_name());
        let definition = toolbox.dataset_search.definition(String::new()).await;
        assert_eq!(definition.name, Capability::DatasetSearch.tool_name());
    }

    #[test]
    fn test_parameters_schema_requires_query() {
        let schema = SearchArgs::parameters_schema();
        assert!(schema["properties"]["query"].is_object());
        assert_eq!(schema["required"][0], "query");
    }

    #[test]
    fn test_require_query() {
        let blank = SearchArgs {
            query: "  ".to_string(),
        };
        assert!(require_query(&blank).is_err());

        let ok = SearchArgs {
            query: " retail ".to_string(),
        };
        assert_eq!(require_query(&ok).unwrap(), "retail");
    }

    #[test]
    fn test_toolbox_builds_from_default_config() {
        assert!(Toolbox::new(&SearchConfig::default()).is_ok());
    }
}
