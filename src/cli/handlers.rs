use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cli::commands::Commands;
use crate::cli::output::{OutputFormat, FORMATTER};
use crate::environments::java::{current_version_from, JdkProber, Registry};
use crate::error::{AppResult, ContextualResult};
use crate::infrastructure::config_repository::ConfigRepository;
use crate::infrastructure::shell::{detect_shell, ScriptBuilder};

/// 单个命令的执行结果
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// 写到标准输出的内容
    pub output: String,
    /// 注册表是否被修改，需要持久化
    pub modified: bool,
}

impl CommandOutcome {
    fn output(output: String) -> Self {
        Self {
            output,
            modified: false,
        }
    }

    fn modified(output: String) -> Self {
        Self {
            output,
            modified: true,
        }
    }
}

/// 命令处理器
///
/// 流程：校验参数 → 加载注册表 → 执行 → 修改后保存。
pub struct CommandHandler {
    repository: Arc<dyn ConfigRepository>,
    prober: Arc<dyn JdkProber>,
    scripts: ScriptBuilder,
    working_dir: PathBuf,
}

impl CommandHandler {
    /// 创建新的命令处理器
    pub fn new(
        repository: Arc<dyn ConfigRepository>,
        prober: Arc<dyn JdkProber>,
        scripts_dir: PathBuf,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            repository,
            prober,
            scripts: ScriptBuilder::new(scripts_dir),
            working_dir,
        }
    }

    /// 处理命令，返回需要写到标准输出的内容
    pub async fn handle_command(&self, command: Commands) -> ContextualResult<String> {
        let operation = format!("执行 `{}`", command.name());
        command
            .validate()
            .map_err(|e| e.with_context(&format!("{operation} 参数校验")))?;

        let mut registry = self
            .repository
            .load_registry()
            .await
            .map_err(|e| e.with_context("加载 jdkman 配置文件"))?;

        let outcome = self
            .execute(command, &mut registry)
            .await
            .map_err(|e| e.with_context(&operation))?;

        if outcome.modified {
            self.repository
                .save_registry(&registry)
                .await
                .map_err(|e| e.with_context("保存 jdkman 配置文件"))?;
        }
        Ok(outcome.output)
    }

    /// 在给定的注册表上执行命令
    pub async fn execute(&self, command: Commands, registry: &mut Registry) -> AppResult<CommandOutcome> {
        match command {
            Commands::List { verbose, json } => {
                let current = current_version_from(&self.working_dir, registry);
                let output = FORMATTER.format_list(
                    registry,
                    current,
                    verbose,
                    OutputFormat::from_json_flag(json),
                )?;
                Ok(CommandOutcome::output(output + "\n"))
            }
            Commands::Add { java_home } => {
                let home = self.absolute(Path::new(&java_home));
                let id = registry.add(&home, self.prober.as_ref()).await?;
                Ok(CommandOutcome::modified(format!("{id}\n")))
            }
            Commands::Remove { id } => {
                let removed = registry.remove(&id)?;
                info!(id = %removed.id, home = %removed.home, "jdk removed");
                Ok(CommandOutcome::modified(String::new()))
            }
            Commands::Default { id } => {
                registry.set_default(&id)?;
                info!(id = %id, "default jdk updated");
                Ok(CommandOutcome::modified(String::new()))
            }
            Commands::Refresh => {
                let report = registry.refresh(self.prober.as_ref()).await;
                if !report.failed.is_empty() {
                    warn!(failed = ?report.failed, "some jdks could not be re-added");
                }
                debug!(
                    removed = report.removed.len(),
                    readded = report.readded.len(),
                    "refresh finished"
                );
                Ok(CommandOutcome::modified(String::new()))
            }
            Commands::Which => {
                // 找不到时不输出任何内容
                let output = current_version_from(&self.working_dir, registry)
                    .map(|jdk| format!("{}\n", jdk.home))
                    .unwrap_or_default();
                Ok(CommandOutcome::output(output))
            }
            Commands::Init { shell } => {
                let shell = shell.unwrap_or_else(detect_shell);
                self.scripts.install_launchers()?;
                let script = self.scripts.eval_script(shell);
                Ok(CommandOutcome::output(script + "\n"))
            }
        }
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}
