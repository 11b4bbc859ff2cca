//! Web检索工具

use rig::tool::Tool;

use super::{SearchArgs, SearchToolError, require_query};
use crate::search::{AggregatedResults, SearchAdapter, TavilyAdapter, TrustedSearch};

/// 通用Web检索
#[derive(Debug, Clone)]
pub struct AgentToolWebSearch {
    web: TavilyAdapter,
}

impl AgentToolWebSearch {
    pub fn new(web: TavilyAdapter) -> Self {
        Self { web }
    }
}

impl Tool for AgentToolWebSearch {
    const NAME: &'static str = "web_search";

    type Error = SearchToolError;
    type Args = SearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the web for recent market data, company news and industry reports. Returns a markdown list of results with links."
                .to_string(),
            parameters: SearchArgs::parameters_schema(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...web_search@{:?}", args);
        let query = require_query(&args)?;

        let outcome = self.web.search(query).await;
        let aggregated =
            AggregatedResults::merge("Web Search", query, vec![(self.web.source(), outcome)]);
        Ok(aggregated.render())
    }
}

/// 仅在可信媒体域名内检索
#[derive(Debug, Clone)]
pub struct AgentToolTrustedSearch {
    trusted: TrustedSearch,
}

impl AgentToolTrustedSearch {
    pub fn new(trusted: TrustedSearch) -> Self {
        Self { trusted }
    }
}

impl Tool for AgentToolTrustedSearch {
    const NAME: &'static str = "trusted_search";

    type Error = SearchToolError;
    type Args = SearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: format!(
                "Search only authoritative news outlets ({}). Use it to verify figures and claims found by general web search.",
                self.trusted.domains().join(", ")
            ),
            parameters: SearchArgs::parameters_schema(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...trusted_search@{:?}", args);
        let query = require_query(&args)?;

        Ok(self.trusted.search(query).await.render())
    }
}
