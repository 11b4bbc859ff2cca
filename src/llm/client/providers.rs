//! LLM Provider支持模块

use anyhow::Result;
use rig::{
    agent::{Agent, AgentBuilder, AgentBuilderSimple},
    client::CompletionClient,
    completion::{CompletionModel, Prompt, PromptError},
    providers::gemini::completion::gemini_api_types::{AdditionalParameters, GenerationConfig},
};

use super::types::StageRequest;
use crate::config::{LLMConfig, LLMProvider};
use crate::llm::tools::{Capability, Toolbox};

/// 统一的Provider客户端枚举
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    OpenRouter(rig::providers::openrouter::Client),
    Anthropic(rig::providers::anthropic::Client),
    Gemini(rig::providers::gemini::Client),
    Ollama(rig::providers::ollama::Client),
}

impl ProviderClient {
    /// 根据配置创建相应的provider客户端
    pub fn new(config: &LLMConfig) -> Result<Self> {
        let base_url = config.api_base_url.as_deref();
        match config.provider {
            LLMProvider::OpenAI => {
                let mut builder = rig::providers::openai::Client::builder(&config.api_key);
                if let Some(url) = base_url {
                    builder = builder.base_url(url);
                }
                Ok(ProviderClient::OpenAI(builder.build()))
            }
            LLMProvider::DeepSeek => {
                let mut builder = rig::providers::deepseek::Client::builder(&config.api_key);
                if let Some(url) = base_url {
                    builder = builder.base_url(url);
                }
                Ok(ProviderClient::DeepSeek(builder.build()))
            }
            LLMProvider::OpenRouter => {
                let client = rig::providers::openrouter::Client::builder(&config.api_key).build();
                Ok(ProviderClient::OpenRouter(client))
            }
            LLMProvider::Anthropic => {
                let client =
                    rig::providers::anthropic::ClientBuilder::new(&config.api_key).build()?;
                Ok(ProviderClient::Anthropic(client))
            }
            LLMProvider::Gemini => {
                let client = rig::providers::gemini::Client::builder(&config.api_key).build()?;
                Ok(ProviderClient::Gemini(client))
            }
            LLMProvider::Ollama => {
                let mut builder = rig::providers::ollama::Client::builder();
                if let Some(url) = base_url {
                    builder = builder.base_url(url);
                }
                Ok(ProviderClient::Ollama(builder.build()))
            }
        }
    }

    /// 为一个阶段创建Agent，只挂载该阶段声明的工具
    pub fn create_agent(
        &self,
        model: &str,
        request: &StageRequest,
        config: &LLMConfig,
        toolbox: &Toolbox,
    ) -> Result<ProviderAgent> {
        let agent = match self {
            ProviderClient::OpenAI(client) => {
                let builder = client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder();
                ProviderAgent::OpenAI(finish_agent(builder, request, config, toolbox))
            }
            ProviderClient::DeepSeek(client) => {
                ProviderAgent::DeepSeek(finish_agent(client.agent(model), request, config, toolbox))
            }
            ProviderClient::OpenRouter(client) => ProviderAgent::OpenRouter(finish_agent(
                client.agent(model),
                request,
                config,
                toolbox,
            )),
            ProviderClient::Anthropic(client) => ProviderAgent::Anthropic(finish_agent(
                client.agent(model),
                request,
                config,
                toolbox,
            )),
            ProviderClient::Gemini(client) => {
                let gen_cfg = GenerationConfig::default();
                let cfg = AdditionalParameters::default().with_config(gen_cfg);
                let builder = client
                    .agent(model)
                    .additional_params(serde_json::to_value(cfg)?);
                ProviderAgent::Gemini(finish_agent(builder, request, config, toolbox))
            }
            ProviderClient::Ollama(client) => {
                ProviderAgent::Ollama(finish_agent(client.agent(model), request, config, toolbox))
            }
        };
        Ok(agent)
    }
}

/// 设置preamble、采样参数与工具后构建Agent
fn finish_agent<M>(
    builder: AgentBuilder<M>,
    request: &StageRequest,
    config: &LLMConfig,
    toolbox: &Toolbox,
) -> Agent<M>
where
    M: CompletionModel,
{
    let builder = builder
        .preamble(&request.system_prompt)
        .max_tokens(config.max_tokens.into())
        .temperature(request.temperature);

    // 挂载第一个工具后builder类型变为AgentBuilderSimple
    let mut capabilities = request.capabilities.iter();
    let Some(first) = capabilities.next() else {
        return builder.build();
    };
    let builder = capabilities.fold(attach_first_tool(builder, first, toolbox), |builder, c| {
        attach_tool(builder, c, toolbox)
    });

    builder.build()
}

fn attach_first_tool<M>(
    builder: AgentBuilder<M>,
    capability: &Capability,
    toolbox: &Toolbox,
) -> AgentBuilderSimple<M>
where
    M: CompletionModel,
{
    match capability {
        Capability::WebSearch => builder.tool(toolbox.web_search.clone()),
        Capability::TrustedSearch => builder.tool(toolbox.trusted_search.clone()),
        Capability::GitHubCode => builder.tool(toolbox.github_code.clone()),
        Capability::KaggleDatasets => builder.tool(toolbox.kaggle_datasets.clone()),
        Capability::DatasetSearch => builder.tool(toolbox.dataset_search.clone()),
    }
}

fn attach_tool<M>(
    builder: AgentBuilderSimple<M>,
    capability: &Capability,
    toolbox: &Toolbox,
) -> AgentBuilderSimple<M>
where
    M: CompletionModel,
{
    match capability {
        Capability::WebSearch => builder.tool(toolbox.web_search.clone()),
        Capability::TrustedSearch => builder.tool(toolbox.trusted_search.clone()),
        Capability::GitHubCode => builder.tool(toolbox.github_code.clone()),
        Capability::KaggleDatasets => builder.tool(toolbox.kaggle_datasets.clone()),
        Capability::DatasetSearch => builder.tool(toolbox.dataset_search.clone()),
    }
}

/// 统一的Agent枚举
pub enum ProviderAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    OpenRouter(Agent<rig::providers::openrouter::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
    Gemini(Agent<rig::providers::gemini::completion::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    Ollama(Agent<rig::providers::ollama::CompletionModel<reqwest::Client>>),
}

impl ProviderAgent {
    /// 单轮对话
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        match self {
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::OpenRouter(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Anthropic(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Gemini(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Ollama(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
        }
    }

    /// 多轮对话，允许最多 `max_iterations` 轮工具调用
    pub async fn multi_turn(
        &self,
        prompt: &str,
        max_iterations: usize,
    ) -> Result<String, PromptError> {
        match self {
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
            ProviderAgent::OpenRouter(agent) => {
                agent.prompt(prompt).multi_turn(max_iterations).await
            }
            ProviderAgent::Anthropic(agent) => {
                agent.prompt(prompt).multi_turn(max_iterations).await
            }
            ProviderAgent::Gemini(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
            ProviderAgent::Ollama(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
        }
    }
}
