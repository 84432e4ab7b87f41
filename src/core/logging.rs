//! 日志初始化
//!
//! 标准输出保留给 `which` 和 shell 初始化脚本，日志统一写到标准错误。

use std::io;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::constants::{env, log};

/// 计算日志过滤器：`JDKMAN_LOG` > 设置文件中的级别 > 默认级别
pub fn build_filter(configured_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(env::JDKMAN_LOG)
        .or_else(|_| EnvFilter::try_new(configured_level.unwrap_or(log::DEFAULT_LOG_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(log::DEFAULT_LOG_LEVEL))
}

/// 初始化全局日志，重复调用时忽略
pub fn init_logging(configured_level: Option<&str>) {
    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(build_filter(configured_level))
        .with(layer)
        .try_init();
}
