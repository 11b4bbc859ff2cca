//! LLM客户端 - 为流水线的每个阶段执行一次带工具的生成

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::future::Future;
use tracing::{info, warn};

use crate::config::{Config, LLMConfig};
use crate::llm::tools::Toolbox;

mod providers;
mod react_executor;
pub mod types;

pub use types::{ReActConfig, ReActResponse, StageRequest};

use providers::ProviderClient;
use react_executor::ReActExecutor;

/// 流水线依赖的生成接口
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// 执行一个阶段，返回该阶段的markdown产出
    async fn run_stage(&self, request: &StageRequest) -> Result<String>;
}

/// 基于rig的LLM客户端
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    verbose: bool,
    client: ProviderClient,
    toolbox: Toolbox,
}

impl LLMClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)
            .with_context(|| format!("Failed to create {} client", config.llm.provider))?;
        let toolbox = Toolbox::new(&config.search)?;
        Ok(Self {
            config: config.llm.clone(),
            verbose: config.verbose,
            client,
            toolbox,
        })
    }

    /// 通用重试逻辑，`retry_attempts` 为总尝试次数
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        retry_with_backoff(&self.config, operation).await
    }

    fn react_config(&self) -> ReActConfig {
        ReActConfig {
            max_iterations: self.config.max_turns,
            verbose: self.verbose,
            return_partial_on_max_depth: true,
        }
    }
}

#[async_trait]
impl AgentBackend for LLMClient {
    async fn run_stage(&self, request: &StageRequest) -> Result<String> {
        let agent =
            self.client
                .create_agent(&self.config.model, request, &self.config, &self.toolbox)?;

        let content = if request.uses_tools() {
            let react_config = self.react_config();
            let response = self
                .retry_with_backoff(|| async {
                    ReActExecutor::execute(&agent, &request.user_prompt, &react_config).await
                })
                .await?;
            if response.stopped_by_max_depth {
                warn!(
                    stage = %request.stage,
                    tool_calls = response.tool_calls_history.len(),
                    "stage output truncated by tool turn limit"
                );
            }
            response.content
        } else {
            self.retry_with_backoff(|| async { agent.prompt(&request.user_prompt).await })
                .await?
        };

        if content.trim().is_empty() {
            anyhow::bail!("model returned an empty response");
        }
        info!(stage = %request.stage, chars = content.len(), "stage generated");
        Ok(content)
    }
}

/// 按配置的次数与间隔重试异步操作
pub async fn retry_with_backoff<T, F, Fut>(config: &LLMConfig, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = config.retry_attempts.max(1);
    let mut attempts = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(err) => {
                attempts += 1;
                if attempts >= max_attempts {
                    return Err(err);
                }
                eprintln!(
                    "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                    attempts, max_attempts, err
                );
                tokio::time::sleep(std::time::Duration::from_millis(config.retry_delay_ms)).await;
            }
        }
    }
}
