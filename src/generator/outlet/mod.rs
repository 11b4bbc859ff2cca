//! 产出落盘：阶段文件、最终报告与运行日志

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;
use uuid::Uuid;

use crate::generator::report::Report;
use crate::generator::task::{CompanyName, Task};

pub trait Outlet {
    /// 保存阶段产出，返回写入的路径
    async fn save_stage(&self, task: &Task, content: &str) -> Result<PathBuf>;

    /// 保存可下载的最终报告
    async fn save_final(&self, report: &Report) -> Result<PathBuf>;

    /// 记录一条运行事件
    async fn record(&self, event: &str);
}

/// 写入输出目录的运行日志，每行带时间戳与本次运行的id
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
    run_id: Uuid,
}

impl RunLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            run_id: Uuid::new_v4(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub async fn append(&self, event: &str) -> Result<()> {
        let line = format!(
            "[{}] [{}] {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.run_id,
            event
        );
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

pub struct DiskOutlet {
    output_dir: PathBuf,
    run_log: Option<RunLog>,
}

impl DiskOutlet {
    /// 创建输出目录；`with_run_log` 为真时在其中写 `<slug>_log.txt`
    pub async fn create(output_dir: &Path, company: &CompanyName, with_run_log: bool) -> Result<Self> {
        fs::create_dir_all(output_dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

        let run_log = with_run_log
            .then(|| RunLog::new(output_dir.join(format!("{}_log.txt", company.slug()))));

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            run_log,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn run_log(&self) -> Option<&RunLog> {
        self.run_log.as_ref()
    }
}

impl Outlet for DiskOutlet {
    async fn save_stage(&self, task: &Task, content: &str) -> Result<PathBuf> {
        fs::write(&task.output_file, content)
            .await
            .with_context(|| format!("Failed to write {}", task.output_file.display()))?;
        println!("💾 已保存阶段产出: {}", task.output_file.display());
        Ok(task.output_file.clone())
    }

    async fn save_final(&self, report: &Report) -> Result<PathBuf> {
        let path = self.output_dir.join(report.download_file_name());
        fs::write(&path, &report.markdown)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("📄 最终报告: {}", path.display());
        Ok(path)
    }

    async fn record(&self, event: &str) {
        if let Some(run_log) = &self.run_log {
            if let Err(e) = run_log.append(event).await {
                warn!(path = %run_log.path().display(), error = %e, "run log write failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::agents::Role;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_log_appends_tagged_lines() {
        let dir = TempDir::new().unwrap();
        let company = CompanyName::parse("Acme Retail").unwrap();
        let outlet = DiskOutlet::create(dir.path(), &company, true).await.unwrap();

        outlet.record("stage research started").await;
        outlet.record("stage research completed").await;

        let run_log = outlet.run_log().unwrap();
        assert_eq!(run_log.path(), dir.path().join("acme_retail_log.txt"));
        let content = std::fs::read_to_string(run_log.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(&run_log.run_id().to_string()));
        assert!(lines[1].ends_with("stage research completed"));
    }

    #[tokio::test]
    async fn test_run_log_disabled() {
        let dir = TempDir::new().unwrap();
        let company = CompanyName::parse("Acme").unwrap();
        let outlet = DiskOutlet::create(dir.path(), &company, false).await.unwrap();
        outlet.record("ignored").await;
        assert!(outlet.run_log().is_none());
        assert!(!dir.path().join("acme_log.txt").exists());
    }

    #[tokio::test]
    async fn test_save_stage_writes_task_file() {
        let dir = TempDir::new().unwrap();
        let company = CompanyName::parse("Acme").unwrap();
        let outlet = DiskOutlet::create(dir.path(), &company, false).await.unwrap();

        let task = Task::new(Role::Research, &company, dir.path());
        let path = outlet.save_stage(&task, "# Research").await.unwrap();
        assert_eq!(path, dir.path().join("acme_research.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Research");
    }

    #[tokio::test]
    async fn test_save_stage_reports_write_error() {
        let dir = TempDir::new().unwrap();
        let company = CompanyName::parse("Acme").unwrap();
        let outlet = DiskOutlet::create(dir.path(), &company, false).await.unwrap();

        let task = Task::new(Role::Research, &company, &dir.path().join("missing"));
        let err = outlet.save_stage(&task, "# Research").await.unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
