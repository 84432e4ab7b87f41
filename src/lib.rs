// 核心模块
pub mod cli;
pub mod core;
pub mod environments;
pub mod error;
pub mod infrastructure;

// 重新导出常用类型
pub use cli::{Cli, CommandHandler, Commands};
pub use environments::java::{
    current_version, resolve, JdkProber, JdkRecord, MatchOptions, ProcessProber, Registry,
    VersionSpec,
};
pub use error::{AppError, AppResult, ContextualError, ContextualResult};
pub use infrastructure::{ConfigRepository, FileSystemConfigRepository, Settings};
// 使用命名空间导入常量，避免冲突
pub use core::constants as app_constants;
