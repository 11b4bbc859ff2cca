//! 数据集检索工具

use rig::tool::Tool;

use super::{SearchArgs, SearchToolError, require_query};
use crate::search::{AggregatedResults, DatasetSearch, KaggleAdapter, SearchAdapter};

/// 仅检索 Kaggle
#[derive(Debug, Clone)]
pub struct AgentToolKaggleDatasets {
    kaggle: KaggleAdapter,
}

impl AgentToolKaggleDatasets {
    pub fn new(kaggle: KaggleAdapter) -> Self {
        Self { kaggle }
    }
}

impl Tool for AgentToolKaggleDatasets {
    const NAME: &'static str = "kaggle_dataset_search";

    type Error = SearchToolError;
    type Args = SearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search Kaggle for datasets. Each result carries size, licence and a usability score."
                .to_string(),
            parameters: SearchArgs::parameters_schema(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...kaggle_dataset_search@{:?}", args);
        let query = require_query(&args)?;

        let outcome = self.kaggle.search(query).await;
        let aggregated = AggregatedResults::merge(
            "Kaggle Datasets",
            query,
            vec![(self.kaggle.source(), outcome)],
        );
        Ok(aggregated.render())
    }
}

/// Kaggle / HuggingFace / GitHub 的合并检索
#[derive(Debug, Clone)]
pub struct AgentToolDatasetSearch {
    datasets: DatasetSearch,
}

impl AgentToolDatasetSearch {
    pub fn new(datasets: DatasetSearch) -> Self {
        Self { datasets }
    }
}

impl Tool for AgentToolDatasetSearch {
    const NAME: &'static str = "dataset_search";

    type Error = SearchToolError;
    type Args = SearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search Kaggle, HuggingFace and GitHub at once for datasets matching a topic. Results are de-duplicated and grouped by source."
                .to_string(),
            parameters: SearchArgs::parameters_schema(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...dataset_search@{:?}", args);
        let query = require_query(&args)?;

        Ok(self.datasets.search(query).await.render())
    }
}
