//! 应用层的错误类型
//!
//! 业务流程整体使用 `anyhow::Result` 传递错误，这里定义需要被调用方区分的错误分类，
//! 调用方可以通过 `anyhow::Error::downcast_ref::<SynapseError>()` 识别。

use std::path::PathBuf;

use crate::generator::agents::Role;

#[derive(Debug, thiserror::Error)]
pub enum SynapseError {
    /// 缺少必需的密钥配置，启动即失败
    #[error("missing required secret `{0}`; set it in the environment, .env or synapse.toml")]
    MissingSecret(&'static str),

    /// 配置文件读取或解析失败
    #[error("config error at {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    /// 用户输入不合法（例如公司名为空）
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 某个流水线阶段执行失败，后续阶段不再执行
    #[error("stage `{stage}` failed, remaining stages were not run: {source:#}")]
    StageFailed {
        stage: Role,
        #[source]
        source: anyhow::Error,
    },
}

impl SynapseError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
