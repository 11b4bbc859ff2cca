//! ReAct执行器 - 负责执行带工具的多轮对话

use anyhow::Result;
use rig::completion::{AssistantContent, Message, PromptError};
use tracing::{debug, warn};

use super::providers::ProviderAgent;
use super::types::{ReActConfig, ReActResponse};

pub struct ReActExecutor;

impl ReActExecutor {
    pub async fn execute(
        agent: &ProviderAgent,
        user_prompt: &str,
        config: &ReActConfig,
    ) -> Result<ReActResponse> {
        if config.verbose {
            println!(
                "   ♻️ 激活ReAct Agent模式，最大迭代次数: {}",
                config.max_iterations
            );
        }

        match agent.multi_turn(user_prompt, config.max_iterations).await {
            Ok(response) => {
                if config.verbose {
                    println!("   ✅ ReAct Agent任务完成");
                }
                Ok(ReActResponse::success(response, config.max_iterations))
            }
            Err(PromptError::MaxDepthError {
                max_depth,
                chat_history,
                prompt: _,
            }) => {
                warn!(max_depth, "tool turn budget exhausted");
                if !config.return_partial_on_max_depth {
                    return Err(anyhow::anyhow!(
                        "agent did not finish within {} tool turns",
                        max_depth
                    ));
                }

                let tool_calls = Self::collect_tool_calls(&chat_history);
                let content = Self::last_assistant_text(&chat_history).ok_or_else(|| {
                    anyhow::anyhow!(
                        "agent produced no text within {} tool turns ({} tool calls)",
                        max_depth,
                        tool_calls.len()
                    )
                })?;
                debug!(tool_calls = ?tool_calls, "partial result recovered");

                Ok(ReActResponse::max_depth_reached(
                    format!(
                        "{}\n\n> Note: generation stopped after reaching the limit of {} tool turns.",
                        content, max_depth
                    ),
                    max_depth,
                    tool_calls,
                ))
            }
            Err(e) => {
                if config.verbose {
                    println!("   ❌ ReAct Agent出错: {}", e);
                }
                Err(anyhow::anyhow!("agent call failed: {}", e))
            }
        }
    }

    /// 最后一条非空的助手文本
    fn last_assistant_text(chat_history: &[Message]) -> Option<String> {
        chat_history.iter().rev().find_map(|msg| {
            let Message::Assistant { content, .. } = msg else {
                return None;
            };
            let text = content
                .iter()
                .filter_map(|c| match c {
                    AssistantContent::Text(text) => Some(text.text.clone()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n");
            (!text.trim().is_empty()).then_some(text)
        })
    }

    fn collect_tool_calls(chat_history: &[Message]) -> Vec<String> {
        chat_history
            .iter()
            .filter_map(|msg| match msg {
                Message::Assistant { content, .. } => Some(content.iter()),
                _ => None,
            })
            .flatten()
            .filter_map(|c| match c {
                AssistantContent::ToolCall(call) => Some(format!(
                    "{}({})",
                    call.function.name, call.function.arguments
                )),
                _ => None,
            })
            .collect()
    }
}
