//! 公司名与阶段任务

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::error::SynapseError;
use crate::generator::agents::{Role, TaskBrief};

/// 校验过的公司名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyName(String);

impl CompanyName {
    pub const EMPTY_MESSAGE: &'static str = "Please enter a company name.";

    pub fn parse(raw: &str) -> Result<Self, SynapseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SynapseError::invalid_input(Self::EMPTY_MESSAGE));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 文件名前缀：小写，空格替换为下划线
    pub fn slug(&self) -> String {
        self.0.to_lowercase().replace(' ', "_")
    }
}

impl Display for CompanyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// 已完成阶段的产出，作为后续阶段的上下文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutput {
    pub role: Role,
    pub content: String,
}

/// 一个角色针对一家公司的任务，状态只由流水线修改
#[derive(Debug, Clone)]
pub struct Task {
    pub role: Role,
    pub brief: TaskBrief,
    pub output_file: PathBuf,
    pub(crate) upstream_context: Vec<StageOutput>,
    pub(crate) output: Option<String>,
    pub(crate) status: TaskStatus,
    pub(crate) error: Option<String>,
}

impl Task {
    pub fn new(role: Role, company: &CompanyName, output_dir: &Path) -> Self {
        Self {
            role,
            brief: role.brief(company.as_str()),
            output_file: output_dir.join(format!("{}_{}.md", company.slug(), role.stage_key())),
            upstream_context: Vec::new(),
            output: None,
            status: TaskStatus::Pending,
            error: None,
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn upstream_context(&self) -> &[StageOutput] {
        &self.upstream_context
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
