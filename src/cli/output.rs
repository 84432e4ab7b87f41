use serde::Serialize;

use crate::environments::java::{JdkRecord, Registry};
use crate::error::AppResult;
use crate::infrastructure::shell::is_windows;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// `list --json` 的输出结构
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListView<'a> {
    #[serde(rename = "defaultJDK")]
    default_jdk: Option<&'a str>,
    current: Option<&'a str>,
    jdks: &'a [JdkRecord],
}

/// 输出格式化器
pub struct OutputFormatter;

impl OutputFormatter {
    /// 格式化 JDK 列表
    pub fn format_list(
        &self,
        registry: &Registry,
        current: Option<&JdkRecord>,
        verbose: bool,
        format: OutputFormat,
    ) -> AppResult<String> {
        match format {
            OutputFormat::Text => Ok(self.format_table(registry, current, verbose)),
            OutputFormat::Json => {
                let view = ListView {
                    default_jdk: registry.default_jdk.as_deref(),
                    current: current.map(|jdk| jdk.id.as_str()),
                    jdks: &registry.jdks,
                };
                Ok(serde_json::to_string_pretty(&view)?)
            }
        }
    }

    fn format_table(&self, registry: &Registry, current: Option<&JdkRecord>, verbose: bool) -> String {
        let (default_mark, current_mark) = if is_windows() {
            ("   *", "   *")
        } else {
            ("   ○", "   ●")
        };

        let mut header = vec!["id", "version", "build", "full", "vendor", "default", "current"];
        if verbose {
            header.push("home");
        }
        let mut rows: Vec<Vec<String>> = vec![header.into_iter().map(str::to_string).collect()];

        for jdk in &registry.jdks {
            let mut row = vec![
                jdk.id.clone(),
                jdk.display_version(),
                jdk.build_version.clone().unwrap_or_default(),
                jdk.full_version.clone(),
                jdk.implementor.clone().unwrap_or_default(),
                mark(registry.is_default(&jdk.id), default_mark),
                mark(current.is_some_and(|c| c.id == jdk.id), current_mark),
            ];
            if verbose {
                row.push(jdk.home.clone());
            }
            rows.push(row);
        }

        render_table(&rows)
    }
}

fn mark(flag: bool, symbol: &str) -> String {
    if flag {
        symbol.to_string()
    } else {
        String::new()
    }
}

/// 左对齐渲染表格，列之间空两格，去掉行尾空白
fn render_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let mut line = String::new();
            for (cell, width) in row.iter().zip(&widths) {
                line.push_str(cell);
                let padding = width - cell.chars().count() + 2;
                line.push_str(&" ".repeat(padding));
            }
            line.trim_end().to_string()
        })
        .collect();

    lines.join("\n")
}

/// 默认输出格式化器实例
pub static FORMATTER: OutputFormatter = OutputFormatter;
