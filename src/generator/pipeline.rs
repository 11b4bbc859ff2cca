//! 四阶段流水线
//!
//! 按 [`Role::ORDER`] 依次执行任务。每个任务的上下文恰好是它之前所有已完成任务的产出，
//! 任一阶段失败即终止，后续任务保持 `Pending` 且不写任何文件。

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::error::SynapseError;
use crate::generator::agents::Role;
use crate::generator::context::GeneratorContext;
use crate::generator::outlet::Outlet;
use crate::generator::prompt::build_stage_request;
use crate::generator::report::Report;
use crate::generator::task::{CompanyName, StageOutput, Task, TaskStatus};
use crate::generator::workflow::TimingScope;
use crate::llm::client::StageRequest;

pub struct Pipeline {
    company: CompanyName,
    tasks: Vec<Task>,
}

impl Pipeline {
    pub fn new(company: &CompanyName, output_dir: &Path) -> Self {
        let tasks = Role::ORDER
            .iter()
            .map(|role| Task::new(*role, company, output_dir))
            .collect();
        Self {
            company: company.clone(),
            tasks,
        }
    }

    pub fn company(&self) -> &CompanyName {
        &self.company
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, role: Role) -> Option<&Task> {
        self.tasks.iter().find(|t| t.role == role)
    }

    /// 依次执行所有阶段，返回最后一个阶段的报告
    pub async fn run<O: Outlet>(
        &mut self,
        context: &GeneratorContext,
        outlet: &O,
        timing: &mut TimingScope,
    ) -> Result<Report> {
        let total = self.tasks.len();
        let today = chrono::Local::now().date_naive();

        for index in 0..total {
            let (finished, remaining) = self.tasks.split_at_mut(index);
            let task = &mut remaining[0];
            let role = task.role;
            let stage = role.stage_key();

            task.upstream_context = finished
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .filter_map(|t| {
                    t.output.as_ref().map(|content| StageOutput {
                        role: t.role,
                        content: content.clone(),
                    })
                })
                .collect();
            task.status = TaskStatus::Running;

            println!("\n🚀 [{}/{}] {} 阶段开始...", index + 1, total, role);
            outlet.record(&format!("stage {} started", stage)).await;
            timing.start_phase(stage);

            let request = build_stage_request(task, context.config.llm.temperature, today);
            let outcome = match generate(context, &request).await {
                Ok(content) => outlet.save_stage(task, &content).await.map(|_| content),
                Err(e) => Err(e),
            };
            let elapsed = timing.end_phase(stage).unwrap_or_default();

            let content = match outcome {
                Ok(content) => content,
                Err(source) => {
                    task.status = TaskStatus::Failed;
                    task.error = Some(format!("{:#}", source));
                    warn!(stage, error = %format!("{:#}", source), "stage failed");
                    outlet
                        .record(&format!("stage {} failed: {:#}", stage, source))
                        .await;
                    return Err(SynapseError::StageFailed { stage: role, source }.into());
                }
            };

            task.status = TaskStatus::Completed;
            info!(stage, elapsed_ms = elapsed.as_millis() as u64, "stage completed");
            println!("✅ {} 阶段完成，耗时 {:.2}秒", role, elapsed.as_secs_f64());
            outlet
                .record(&format!(
                    "stage {} completed in {:.2}s",
                    stage,
                    elapsed.as_secs_f64()
                ))
                .await;
            outlet
                .record(&format!("stage {} output:\n{}", stage, content))
                .await;
            task.output = Some(content);
        }

        let proposal = self
            .task(Role::ProposalWriting)
            .and_then(Task::output)
            .ok_or_else(|| anyhow::anyhow!("proposal stage produced no output"))?;
        Ok(Report::new(self.company.clone(), proposal.to_string()))
    }
}

/// 优先读取缓存，否则调用后端生成并写入缓存
async fn generate(context: &GeneratorContext, request: &StageRequest) -> Result<String> {
    let cache = &context.cache_manager;
    let cache_key = format!(
        "{}\n{}\n{}\n{}",
        context.config.llm.model, request.temperature, request.system_prompt, request.user_prompt
    );

    if let Some(cached) = cache.get::<String>(&request.stage, &cache_key).await {
        println!("   ♻️ 使用缓存结果: {}", request.stage);
        return Ok(cached);
    }

    let content = context.backend.run_stage(request).await?;

    if let Err(e) = cache
        .set(
            &request.stage,
            &cache_key,
            content.clone(),
            Some(&context.config.llm.model),
        )
        .await
    {
        warn!(stage = %request.stage, error = %e, "failed to cache stage output");
    }
    Ok(content)
}
