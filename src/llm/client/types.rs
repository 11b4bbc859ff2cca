//! LLM调用相关的数据结构

use serde::{Deserialize, Serialize};

use crate::llm::tools::Capability;

/// 单个流水线阶段的一次生成请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRequest {
    /// 阶段名，仅用于日志
    pub stage: String,
    pub system_prompt: String,
    pub user_prompt: String,
    /// 本阶段可挂载的工具，为空时退化为单轮对话
    pub capabilities: Vec<Capability>,
    pub temperature: f64,
}

impl StageRequest {
    pub fn uses_tools(&self) -> bool {
        !self.capabilities.is_empty()
    }
}

/// ReAct模式配置
#[derive(Debug, Clone)]
pub struct ReActConfig {
    /// 最大工具调用轮次
    pub max_iterations: usize,
    pub verbose: bool,
    /// 轮次耗尽时是否返回已有的部分结果
    pub return_partial_on_max_depth: bool,
}

impl Default for ReActConfig {
    fn default() -> Self {
        Self {
            max_iterations: 8,
            verbose: false,
            return_partial_on_max_depth: true,
        }
    }
}

/// ReAct执行结果
#[derive(Debug, Clone)]
pub struct ReActResponse {
    pub content: String,
    pub iterations_used: usize,
    pub stopped_by_max_depth: bool,
    /// `name(arguments)` 形式的工具调用记录
    pub tool_calls_history: Vec<String>,
}

impl ReActResponse {
    pub fn success(content: String, iterations_used: usize) -> Self {
        Self {
            content,
            iterations_used,
            stopped_by_max_depth: false,
            tool_calls_history: Vec::new(),
        }
    }

    pub fn max_depth_reached(
        content: String,
        max_depth: usize,
        tool_calls_history: Vec<String>,
    ) -> Self {
        Self {
            content,
            iterations_used: max_depth,
            stopped_by_max_depth: true,
            tool_calls_history,
        }
    }
}
