use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, LLMProvider};

/// 未指定 `--config` 时尝试加载的配置文件
pub const DEFAULT_CONFIG_FILE: &str = "synapse.toml";

/// Synapse - 基于多Agent流水线的企业AI转型方案生成器
#[derive(Parser, Debug)]
#[command(name = "synapse")]
#[command(
    about = "Researches a company with web, GitHub, Kaggle and HuggingFace search, then chains four LLM agents into an executive AI transformation proposal in markdown."
)]
#[command(version)]
pub struct Args {
    /// 公司名称，省略时从标准输入读取
    pub company: Option<String>,

    /// 输出目录
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM Provider (gemini, openai, anthropic, deepseek, openrouter, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 模型名称
    #[arg(long)]
    pub model: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// Tavily 检索 API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 温度参数，覆盖各角色的默认温度
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 每个阶段允许的最大工具调用轮次
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// 启用阶段产出的磁盘缓存
    #[arg(long)]
    pub cache: bool,

    /// 不写运行日志文件
    #[arg(long)]
    pub no_run_log: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置：配置文件 → 环境变量 → 命令行参数
    pub fn into_config(self) -> Result<Config> {
        self.into_config_with(Path::new("."), |key| std::env::var(key).ok())
    }

    /// `base_dir` 用于查找默认配置文件，`env` 用于读取环境变量
    pub fn into_config_with<F>(self, base_dir: &Path, env: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(config_path) => Config::from_file(config_path)?,
            None => {
                let default_config_path = base_dir.join(DEFAULT_CONFIG_FILE);
                if default_config_path.exists() {
                    Config::from_file(&default_config_path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env(env);

        if let Some(company) = self.company {
            config.company_name = Some(company);
        }
        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用 {}",
                    provider_str, config.llm.provider
                );
            }
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = Some(llm_api_base_url);
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = Some(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(max_turns) = self.max_turns {
            config.llm.max_turns = max_turns;
        }

        if self.cache {
            config.cache.enabled = true;
        }
        if self.no_run_log {
            config.write_run_log = false;
        }
        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }
}

/// 交互式读取公司名称
pub fn prompt_company<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "🏢 请输入公司名称: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// 补全公司名称：先校验密钥，缺失时不再进入交互
pub fn resolve_company<R: BufRead, W: Write>(
    config: &mut Config,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    config.validate()?;
    if config.company_name.is_none() {
        config.company_name = Some(prompt_company(input, output)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests;
