//! 阶段产出的磁盘缓存
//!
//! 以完整prompt的MD5作为键，同一公司、同一模型重复运行时直接复用已生成的阶段产出。

use anyhow::Result;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tracing::{debug, warn};

use crate::config::CacheConfig;

pub struct CacheManager {
    config: CacheConfig,
    stats: CacheStats,
}

/// 缓存条目
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: u64,
    /// prompt的MD5哈希值
    pub prompt_hash: String,
    pub model_name: Option<String>,
}

#[derive(Debug, Default)]
struct CacheStats {
    hits: AtomicUsize,
    misses: AtomicUsize,
    writes: AtomicUsize,
    errors: AtomicUsize,
}

/// 一次运行的缓存统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheReport {
    pub hits: usize,
    pub misses: usize,
    pub writes: usize,
    pub errors: usize,
}

impl CacheReport {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl CacheManager {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            stats: CacheStats::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// 生成prompt的MD5哈希
    pub fn hash_prompt(&self, prompt: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(prompt.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn get_cache_path(&self, category: &str, hash: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(category)
            .join(format!("{}.json", hash))
    }

    fn is_expired(&self, timestamp: u64) -> bool {
        let expire_seconds = self.config.expire_hours.saturating_mul(3600);
        now_secs().saturating_sub(timestamp) > expire_seconds
    }

    /// 读取缓存，未命中、过期或损坏都返回 `None`
    pub async fn get<T>(&self, category: &str, prompt: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        if !self.config.enabled {
            return None;
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        let content = match fs::read_to_string(&cache_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
            Err(e) => {
                warn!(path = %cache_path.display(), error = %e, "cache read failed");
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry<T>>(&content) {
            Ok(entry) if self.is_expired(entry.timestamp) => {
                // 删除过期缓存
                let _ = fs::remove_file(&cache_path).await;
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            Ok(entry) => {
                debug!(category, hash = %hash, "cache hit");
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.data)
            }
            Err(e) => {
                warn!(path = %cache_path.display(), error = %e, "cache entry is corrupt");
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// 写入缓存
    pub async fn set<T>(
        &self,
        category: &str,
        prompt: &str,
        data: T,
        model_name: Option<&str>,
    ) -> Result<()>
    where
        T: Serialize,
    {
        if !self.config.enabled {
            return Ok(());
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let entry = CacheEntry {
            data,
            timestamp: now_secs(),
            prompt_hash: hash,
            model_name: model_name.map(str::to_string),
        };

        let written = async {
            let content = serde_json::to_string_pretty(&entry)?;
            fs::write(&cache_path, content).await?;
            anyhow::Ok(())
        }
        .await;

        match written {
            Ok(()) => {
                self.stats.writes.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    pub fn report(&self) -> CacheReport {
        CacheReport {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            writes: self.stats.writes.load(Ordering::Relaxed),
            errors: self.stats.errors.load(Ordering::Relaxed),
        }
    }
}
