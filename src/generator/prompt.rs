//! 阶段提示词的组装

use chrono::NaiveDate;

use crate::generator::agents::RoleProfile;
use crate::generator::task::Task;
use crate::llm::client::StageRequest;

/// 系统提示词：人设 + 系统指令 + 可用工具说明
pub fn build_system_prompt(profile: &RoleProfile) -> String {
    let mut prompt = format!(
        "You are {}, a {}.\n{}\n\nGoal: {}\n\n{}\n",
        profile.name, profile.role, profile.backstory, profile.goal, profile.system_message
    );

    if !profile.capabilities.is_empty() {
        prompt.push_str("\n## Available tools\n");
        for capability in profile.capabilities {
            prompt.push_str(&format!(
                "- `{}`: {}\n",
                capability.tool_name(),
                capability.usage_hint()
            ));
        }
        prompt.push_str(
            "Call the tools for facts and links; never invent URLs. Tool results are markdown you can quote directly.\n",
        );
    }

    prompt.push_str("\nRespond in well-structured markdown.");
    prompt
}

/// 用户提示词：任务说明、日期、上游阶段产出与期望输出
pub fn build_user_prompt(task: &Task, today: NaiveDate) -> String {
    let mut prompt = String::new();

    prompt.push_str("## Task\n");
    prompt.push_str(&task.brief.description);
    prompt.push_str("\n\n");

    prompt.push_str(&format!("## Current date\n{}\n\n", today.format("%Y-%m-%d")));

    if !task.upstream_context().is_empty() {
        prompt.push_str("## Research Materials\n");
        prompt.push_str("Outputs of the previous stages, in order:\n\n");
        for upstream in task.upstream_context() {
            prompt.push_str(&format!(
                "### {}\n{}\n\n",
                upstream.role,
                upstream.content.trim()
            ));
        }
    }

    prompt.push_str("## Expected output\n");
    prompt.push_str(&task.brief.expected_output);
    prompt.push_str("\n\n");

    prompt.push_str("Return only the final markdown deliverable for this task.");
    prompt
}

/// 组装一个阶段的生成请求，`temperature_override` 优先于角色默认温度
pub fn build_stage_request(
    task: &Task,
    temperature_override: Option<f64>,
    today: NaiveDate,
) -> StageRequest {
    let profile = task.role.profile();
    StageRequest {
        stage: task.role.stage_key().to_string(),
        system_prompt: build_system_prompt(profile),
        user_prompt: build_user_prompt(task, today),
        capabilities: profile.capabilities.to_vec(),
        temperature: temperature_override.unwrap_or(profile.temperature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::agents::Role;
    use crate::generator::task::{CompanyName, StageOutput};
    use crate::llm::tools::Capability;
    use std::path::Path;

    fn task(role: Role) -> Task {
        let company = CompanyName::parse("Acme Retail").unwrap();
        Task::new(role, &company, Path::new("outputs"))
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_system_prompt_lists_only_role_tools() {
        let prompt = build_system_prompt(Role::Research.profile());
        assert!(prompt.contains("Industry Research Agent"));
        assert!(prompt.contains("`web_search`"));
        assert!(prompt.contains("`trusted_search`"));
        assert!(!prompt.contains("`dataset_search`"));

        let proposal = build_system_prompt(Role::ProposalWriting.profile());
        assert!(!proposal.contains("## Available tools"));
    }

    #[test]
    fn test_user_prompt_without_context() {
        let prompt = build_user_prompt(&task(Role::Research), date());
        assert!(prompt.contains("Conduct executive-level research for Acme Retail"));
        assert!(prompt.contains("2025-03-01"));
        assert!(!prompt.contains("## Research Materials"));
    }

    #[test]
    fn test_user_prompt_keeps_context_order() {
        let mut task = task(Role::DatasetCuration);
        task.upstream_context = vec![
            StageOutput {
                role: Role::Research,
                content: "RESEARCH-OUT".to_string(),
            },
            StageOutput {
                role: Role::UseCaseGeneration,
                content: "USECASE-OUT".to_string(),
            },
        ];

        let prompt = build_user_prompt(&task, date());
        let research = prompt.find("RESEARCH-OUT").unwrap();
        let usecases = prompt.find("USECASE-OUT").unwrap();
        assert!(research < usecases);
        assert!(prompt.contains("### Industry Research\nRESEARCH-OUT"));
    }

    #[test]
    fn test_stage_request_temperature_override() {
        let request = build_stage_request(&task(Role::DatasetCuration), None, date());
        assert_eq!(request.temperature, 0.25);
        assert_eq!(request.stage, "resources");
        assert!(request.capabilities.contains(&Capability::KaggleDatasets));

        let overridden = build_stage_request(&task(Role::DatasetCuration), Some(0.7), date());
        assert_eq!(overridden.temperature, 0.7);
    }
}
