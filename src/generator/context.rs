use std::sync::Arc;

use anyhow::Result;

use crate::{
    cache::CacheManager,
    config::Config,
    llm::client::{AgentBackend, LLMClient},
};

/// 一次运行共享的依赖
#[derive(Clone)]
pub struct GeneratorContext {
    pub config: Config,
    /// 阶段生成后端
    pub backend: Arc<dyn AgentBackend>,
    pub cache_manager: Arc<CacheManager>,
}

impl GeneratorContext {
    /// 使用基于rig的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        let backend = Arc::new(LLMClient::new(&config)?);
        Ok(Self::with_backend(config, backend))
    }

    pub fn with_backend(config: Config, backend: Arc<dyn AgentBackend>) -> Self {
        let cache_manager = Arc::new(CacheManager::new(config.cache.clone()));
        Self {
            config,
            backend,
            cache_manager,
        }
    }
}
