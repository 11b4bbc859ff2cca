//! 流水线的四个角色
//!
//! 每个角色是一份不可变的静态配置：人设、系统指令、可用工具以及任务模板。

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::llm::tools::Capability;

mod dataset_curator;
mod industry_researcher;
mod proposal_writer;
mod use_case_architect;

pub use proposal_writer::REQUIRED_SECTIONS;

/// 角色标识，同时决定阶段顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Research,
    UseCaseGeneration,
    DatasetCuration,
    ProposalWriting,
}

impl Role {
    /// 流水线的固定执行顺序
    pub const ORDER: [Role; 4] = [
        Role::Research,
        Role::UseCaseGeneration,
        Role::DatasetCuration,
        Role::ProposalWriting,
    ];

    /// 输出文件名中的阶段标识
    pub fn stage_key(&self) -> &'static str {
        match self {
            Role::Research => "research",
            Role::UseCaseGeneration => "usecases",
            Role::DatasetCuration => "resources",
            Role::ProposalWriting => "proposal",
        }
    }

    pub fn profile(&self) -> &'static RoleProfile {
        match self {
            Role::Research => &industry_researcher::PROFILE,
            Role::UseCaseGeneration => &use_case_architect::PROFILE,
            Role::DatasetCuration => &dataset_curator::PROFILE,
            Role::ProposalWriting => &proposal_writer::PROFILE,
        }
    }

    /// 以公司名填充任务模板
    pub fn brief(&self, company: &str) -> TaskBrief {
        let profile = self.profile();
        TaskBrief {
            description: profile.task_template.replace(COMPANY_PLACEHOLDER, company),
            expected_output: profile.expected_output.replace(COMPANY_PLACEHOLDER, company),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Role::Research => "Industry Research",
            Role::UseCaseGeneration => "Use Case Generation",
            Role::DatasetCuration => "Dataset Curation",
            Role::ProposalWriting => "Proposal Writing",
        };
        write!(f, "{}", str)
    }
}

/// 任务模板中的公司名占位符
pub const COMPANY_PLACEHOLDER: &str = "{company}";

/// 角色的静态配置
#[derive(Debug)]
pub struct RoleProfile {
    pub name: &'static str,
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    /// 系统指令，列出产出必须覆盖的内容
    pub system_message: &'static str,
    pub temperature: f64,
    pub capabilities: &'static [Capability],
    /// 任务描述模板，包含 [`COMPANY_PLACEHOLDER`]
    pub task_template: &'static str,
    pub expected_output: &'static str,
}

/// 填充公司名后的任务说明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBrief {
    pub description: String,
    pub expected_output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_stage_keys() {
        let keys: Vec<_> = Role::ORDER.iter().map(Role::stage_key).collect();
        assert_eq!(keys, vec!["research", "usecases", "resources", "proposal"]);
    }

    #[test]
    fn test_brief_substitutes_every_company_clause() {
        for role in Role::ORDER {
            let brief = role.brief("Acme Retail");
            assert!(brief.description.contains("Acme Retail"), "{role}");
            assert!(!brief.description.contains(COMPANY_PLACEHOLDER), "{role}");
            assert!(!brief.expected_output.contains(COMPANY_PLACEHOLDER), "{role}");
        }
    }

    #[test]
    fn test_capabilities_per_role() {
        assert_eq!(Role::Research.profile().capabilities, &[
            Capability::WebSearch,
            Capability::TrustedSearch
        ]);
        assert_eq!(Role::UseCaseGeneration.profile().capabilities, &[
            Capability::WebSearch
        ]);
        assert!(
            Role::DatasetCuration
                .profile()
                .capabilities
                .contains(&Capability::DatasetSearch)
        );
        assert!(Role::ProposalWriting.profile().capabilities.is_empty());
    }

    #[test]
    fn test_temperatures() {
        let temps: Vec<f64> = Role::ORDER.iter().map(|r| r.profile().temperature).collect();
        assert_eq!(temps, vec![0.2, 0.3, 0.25, 0.3]);
    }

    #[test]
    fn test_proposal_instruction_lists_required_sections() {
        let message = Role::ProposalWriting.profile().system_message;
        for section in REQUIRED_SECTIONS {
            assert!(message.contains(&format!("## {}", section)), "{section}");
        }
    }
}
