use clap::{Parser, Subcommand};

use crate::environments::java::JavaValidator;
use crate::error::{AppError, AppResult};
use crate::infrastructure::shell::ShellType;

/// jdkman CLI 应用程序
#[derive(Parser, Debug)]
#[command(name = "jdkman")]
#[command(about = "本地 JDK 版本管理工具，按目录的 .java-version 自动选择 JAVA_HOME", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 顶级命令
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// 显示已注册的 JDK 列表
    #[command(visible_alias = "ls")]
    List {
        /// 同时显示 JAVA_HOME
        #[arg(short, long)]
        verbose: bool,
        /// JSON 格式输出
        #[arg(long)]
        json: bool,
    },
    /// 注册一个 JDK
    Add {
        /// JAVA_HOME 路径
        java_home: String,
    },
    /// 删除已注册的 JDK
    #[command(visible_alias = "rm")]
    Remove {
        /// JDK id
        id: String,
    },
    /// 设置默认 JDK
    Default {
        /// JDK id
        id: String,
    },
    /// 重新探测所有 JDK 并移除失效的记录
    Refresh,
    /// 输出当前目录应使用的 JAVA_HOME
    Which,
    /// 输出需要 eval 的 shell 初始化脚本
    Init {
        /// Shell 类型，默认根据平台选择
        #[arg(value_enum)]
        shell: Option<ShellType>,
    },
}

impl Commands {
    /// 命令名称，用于错误上下文
    pub fn name(&self) -> &'static str {
        match self {
            Commands::List { .. } => "list",
            Commands::Add { .. } => "add",
            Commands::Remove { .. } => "remove",
            Commands::Default { .. } => "default",
            Commands::Refresh => "refresh",
            Commands::Which => "which",
            Commands::Init { .. } => "init",
        }
    }

    /// 执行前的参数校验，不访问注册表
    pub fn validate(&self) -> AppResult<()> {
        match self {
            Commands::Add { java_home } => {
                if java_home.trim().is_empty() {
                    return Err(AppError::invalid("JAVA_HOME", "missing JAVA_HOME for `add`"));
                }
                JavaValidator::validate_java_home(java_home)
            }
            Commands::Remove { id } | Commands::Default { id } => {
                if id.trim().is_empty() {
                    return Err(AppError::invalid(
                        "id",
                        format!("missing id for `{}`", self.name()),
                    ));
                }
                Ok(())
            }
            Commands::List { .. } | Commands::Refresh | Commands::Which | Commands::Init { .. } => {
                Ok(())
            }
        }
    }
}
