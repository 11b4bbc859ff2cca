use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SynapseError;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(LLMProvider::Gemini),
            "openai" => Ok(LLMProvider::OpenAI),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 环境变量名称
pub struct EnvKeys;

impl EnvKeys {
    pub const LLM_API_KEY: &'static str = "SYNAPSE_LLM_API_KEY";
    /// 兼容旧的 Gemini 密钥变量名
    pub const GEMINI_API_KEY: &'static str = "GEMINI_API_KEY";
    pub const SEARCH_API_KEY: &'static str = "TAVILY_API_KEY";
    pub const GITHUB_TOKEN: &'static str = "GITHUB_TOKEN";
    pub const KAGGLE_USERNAME: &'static str = "KAGGLE_USERNAME";
    pub const KAGGLE_KEY: &'static str = "KAGGLE_KEY";
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 目标公司名称
    pub company_name: Option<String>,

    /// 输出路径
    pub output_path: PathBuf,

    /// 是否写入运行日志 `<company>_log.txt`
    pub write_run_log: bool,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 外部检索配置
    pub search: SearchConfig,

    /// 缓存配置
    pub cache: CacheConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址，仅对 OpenAI 兼容的 provider 生效
    pub api_base_url: Option<String>,

    /// 模型名称
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 全局温度，设置后覆盖各角色的默认温度
    pub temperature: Option<f64>,

    /// 调用次数上限，1 表示只调用一次、不重试
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 带工具的阶段最多进行的对话轮数
    pub max_turns: usize,
}

/// 外部检索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Web检索（Tavily）API KEY
    pub api_key: String,

    pub tavily_base_url: String,

    pub github_api_base_url: String,

    pub kaggle_base_url: String,

    pub huggingface_base_url: String,

    /// 单次请求超时（秒）
    pub timeout_seconds: u64,

    /// Web检索返回条数
    pub max_results: usize,

    /// 数据集/代码仓库检索每个来源保留的条数
    pub per_source_limit: usize,

    /// 可信检索的域名白名单
    pub trusted_domains: Vec<String>,

    /// 可信检索每个域名返回条数
    pub trusted_results_per_domain: usize,

    pub github_token: Option<String>,

    pub kaggle_username: Option<String>,

    pub kaggle_key: Option<String>,
}

/// 缓存配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// 是否启用缓存
    pub enabled: bool,

    /// 缓存目录
    pub cache_dir: PathBuf,

    /// 缓存过期时间（小时）
    pub expire_hours: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SynapseError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| SynapseError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// 用环境变量补齐配置中未设置的密钥
    ///
    /// `lookup` 由启动入口传入（通常是 `std::env::var`），其余模块只读取 `Config`。
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if self.llm.api_key.trim().is_empty()
            && let Some(key) =
                non_empty(EnvKeys::LLM_API_KEY).or_else(|| non_empty(EnvKeys::GEMINI_API_KEY))
        {
            self.llm.api_key = key;
        }
        if self.search.api_key.trim().is_empty()
            && let Some(key) = non_empty(EnvKeys::SEARCH_API_KEY)
        {
            self.search.api_key = key;
        }
        if self.search.github_token.is_none() {
            self.search.github_token = non_empty(EnvKeys::GITHUB_TOKEN);
        }
        if self.search.kaggle_username.is_none() {
            self.search.kaggle_username = non_empty(EnvKeys::KAGGLE_USERNAME);
        }
        if self.search.kaggle_key.is_none() {
            self.search.kaggle_key = non_empty(EnvKeys::KAGGLE_KEY);
        }
    }

    /// 校验必需的密钥，缺失时返回 [`SynapseError::MissingSecret`]
    pub fn validate(&self) -> Result<(), SynapseError> {
        if self.llm.provider != LLMProvider::Ollama && self.llm.api_key.trim().is_empty() {
            return Err(SynapseError::MissingSecret(EnvKeys::LLM_API_KEY));
        }
        if self.search.api_key.trim().is_empty() {
            return Err(SynapseError::MissingSecret(EnvKeys::SEARCH_API_KEY));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            company_name: None,
            output_path: PathBuf::from("outputs"),
            write_run_log: true,
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            cache: CacheConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: String::new(),
            api_base_url: None,
            model: String::from("gemini-2.0-flash"),
            max_tokens: 8192,
            temperature: None,
            retry_attempts: 1,
            retry_delay_ms: 5000,
            max_turns: 8,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            tavily_base_url: String::from("https://api.tavily.com"),
            github_api_base_url: String::from("https://api.github.com"),
            kaggle_base_url: String::from("https://www.kaggle.com"),
            huggingface_base_url: String::from("https://huggingface.co"),
            timeout_seconds: 8,
            max_results: 5,
            per_source_limit: 3,
            trusted_domains: vec![
                "reuters.com".to_string(),
                "bloomberg.com".to_string(),
                "ft.com".to_string(),
                "nytimes.com".to_string(),
                "wsj.com".to_string(),
                "bbc.com".to_string(),
                "cnn.com".to_string(),
            ],
            trusted_results_per_domain: 3,
            github_token: None,
            kaggle_username: None,
            kaggle_key: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cache_dir: PathBuf::from(".synapse/cache"),
            expire_hours: 24,
        }
    }
}
