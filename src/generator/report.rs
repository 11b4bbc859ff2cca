//! 最终报告

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};

use crate::generator::agents::REQUIRED_SECTIONS;
use crate::generator::task::CompanyName;

/// 最后一个阶段的产出，对下游是不透明的markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub company: CompanyName,
    pub markdown: String,
}

impl Report {
    pub fn new(company: CompanyName, markdown: String) -> Self {
        Self { company, markdown }
    }

    /// 下载文件名 `<slug>_final_proposal.md`
    pub fn download_file_name(&self) -> String {
        format!("{}_final_proposal.md", self.company.slug())
    }

    /// 报告中所有标题的纯文本
    pub fn headings(&self) -> Vec<String> {
        match to_mdast(&self.markdown, &ParseOptions::default()) {
            Ok(root) => {
                let mut headings = Vec::new();
                collect_headings(&root, &mut headings);
                headings
            }
            // 解析失败时按行识别ATX标题
            Err(_) => self
                .markdown
                .lines()
                .filter_map(|line| {
                    let line = line.trim_start();
                    line.starts_with('#')
                        .then(|| line.trim_start_matches('#').trim().to_string())
                })
                .collect(),
        }
    }

    /// 缺失的必需章节（忽略大小写，允许标题带编号等前后缀）
    pub fn missing_sections(&self) -> Vec<&'static str> {
        let headings: Vec<String> = self.headings().iter().map(|h| h.to_lowercase()).collect();
        REQUIRED_SECTIONS
            .iter()
            .copied()
            .filter(|section| {
                let section = section.to_lowercase();
                !headings.iter().any(|h| h.contains(&section))
            })
            .collect()
    }
}

fn collect_headings(node: &Node, out: &mut Vec<String>) {
    if let Node::Heading(_) = node {
        out.push(node.to_string().trim().to_string());
        return;
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_headings(child, out);
        }
    }
}
