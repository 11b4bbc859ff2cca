//! GitHub代码仓库检索工具

use rig::tool::Tool;

use super::{SearchArgs, SearchToolError, require_query};
use crate::search::{AggregatedResults, GitHubAdapter, SearchAdapter};

#[derive(Debug, Clone)]
pub struct AgentToolGitHubCode {
    github: GitHubAdapter,
}

impl AgentToolGitHubCode {
    pub fn new(github: GitHubAdapter) -> Self {
        Self { github }
    }
}

impl Tool for AgentToolGitHubCode {
    const NAME: &'static str = "github_code_search";

    type Error = SearchToolError;
    type Args = SearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search GitHub repositories (sorted by stars) for open-source implementations, notebooks and datasets."
                .to_string(),
            parameters: SearchArgs::parameters_schema(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...github_code_search@{:?}", args);
        let query = require_query(&args)?;

        let outcome = self.github.search(query).await;
        let aggregated = AggregatedResults::merge(
            "GitHub Repositories",
            query,
            vec![(self.github.source(), outcome)],
        );
        Ok(aggregated.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::search::build_http_client;

    #[tokio::test]
    async fn test_offline_search_renders_fallback_link() {
        let config = SearchConfig {
            github_api_base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 2,
            ..Default::default()
        };
        let tool = AgentToolGitHubCode::new(GitHubAdapter::new(
            build_http_client(&config).unwrap(),
            &config,
        ));

        let output = tool
            .call(SearchArgs {
                query: "demand forecasting".to_string(),
            })
            .await
            .unwrap();
        assert!(output.starts_with("# GitHub Repositories: demand forecasting"));
        assert!(output.contains("https://github.com/search?q=demand+forecasting"));
    }
}
