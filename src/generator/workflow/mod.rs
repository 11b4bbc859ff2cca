use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::outlet::{DiskOutlet, Outlet};
use crate::generator::pipeline::Pipeline;
use crate::generator::report::Report;
use crate::generator::task::CompanyName;
use crate::llm::client::AgentBackend;

/// 时间跟踪作用域，按阶段开始的顺序记录耗时
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: Vec<(String, Instant)>,
    phase_durations: Vec<(String, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: Vec::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times
            .push((phase_name.to_string(), Instant::now()));
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        let index = self
            .phase_start_times
            .iter()
            .position(|(name, _)| name == phase_name)?;
        let (name, start_time) = self.phase_start_times.remove(index);
        let duration = start_time.elapsed();
        self.phase_durations.push((name, duration));
        Some(duration)
    }

    pub fn get_total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn get_phase_durations(&self) -> &[(String, Duration)] {
        &self.phase_durations
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.get_total_duration().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 配置校验与公司名校验，任何模型或检索调用之前完成
fn preflight(config: &Config) -> Result<CompanyName> {
    config.validate()?;
    let company = CompanyName::parse(config.company_name.as_deref().unwrap_or_default())?;
    Ok(company)
}

/// 使用配置中的LLM provider执行完整流水线
pub async fn launch(config: &Config) -> Result<Report> {
    let company = preflight(config)?;
    let context = GeneratorContext::new(config.clone())?;
    execute(&context, company).await
}

/// 使用指定的生成后端执行完整流水线
pub async fn launch_with_backend(
    config: &Config,
    backend: Arc<dyn AgentBackend>,
) -> Result<Report> {
    let company = preflight(config)?;
    let context = GeneratorContext::with_backend(config.clone(), backend);
    execute(&context, company).await
}

async fn execute(context: &GeneratorContext, company: CompanyName) -> Result<Report> {
    let config = &context.config;
    let outlet = DiskOutlet::create(&config.output_path, &company, config.write_run_log).await?;
    let mut timing = TimingScope::new();

    println!("🏢 为 {} 生成AI转型方案...", company);
    info!(company = %company, provider = %config.llm.provider, model = %config.llm.model, "run started");
    outlet
        .record(&format!(
            "run started for {} ({} / {})",
            company, config.llm.provider, config.llm.model
        ))
        .await;

    let mut pipeline = Pipeline::new(&company, &config.output_path);
    let report = match pipeline.run(context, &outlet, &mut timing).await {
        Ok(report) => report,
        Err(e) => {
            outlet.record(&format!("run aborted: {:#}", e)).await;
            return Err(e);
        }
    };

    let missing = report.missing_sections();
    if !missing.is_empty() {
        warn!(missing = ?missing, "proposal is missing required sections");
        eprintln!("⚠️ 报告缺少以下章节: {}", missing.join(", "));
        outlet
            .record(&format!("proposal missing sections: {}", missing.join(", ")))
            .await;
    }

    outlet.save_final(&report).await?;

    let timing_report = timing.generate_timing_report();
    println!("\n⏱️ {}", timing_report);
    outlet.record(&timing_report).await;

    let cache_report = context.cache_manager.report();
    if context.cache_manager.is_enabled() {
        info!(
            hits = cache_report.hits,
            misses = cache_report.misses,
            hit_rate = cache_report.hit_rate(),
            "cache summary"
        );
    }
    outlet.record("run completed").await;

    Ok(report)
}

#[cfg(test)]
mod tests;
