use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{env as env_keys, fs, probe};
use crate::error::{AppError, AppResult};

/// 设置文件结构（`config.toml`），所有字段可选
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// `java -version` 的超时时间（秒）
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    /// 日志级别或过滤表达式，`JDKMAN_LOG` 优先
    #[serde(default)]
    pub log_level: Option<String>,
    /// 代理脚本目录
    #[serde(default)]
    pub scripts_dir: Option<PathBuf>,
}

fn default_probe_timeout_secs() -> u64 {
    probe::DEFAULT_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            probe_timeout_secs: default_probe_timeout_secs(),
            log_level: None,
            scripts_dir: None,
        }
    }
}

impl Settings {
    /// 从 TOML 文本解析
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config {
            message: format!("解析设置文件失败: {e}"),
        })
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// 代理脚本目录，未配置时位于数据目录下
    pub fn scripts_dir(&self, data_dir: &Path) -> PathBuf {
        self.scripts_dir
            .clone()
            .unwrap_or_else(|| data_dir.join(fs::SCRIPTS_DIR_NAME))
    }
}

/// 获取数据目录：`$JDKMAN_HOME`，否则为 `~/.jdkman`
pub fn get_data_dir() -> AppResult<PathBuf> {
    if let Some(dir) = env::var_os(env_keys::JDKMAN_HOME).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let home_dir = dirs::home_dir().ok_or_else(|| AppError::Config {
        message: "无法获取用户主目录".to_string(),
    })?;
    Ok(home_dir.join(fs::DATA_DIR_NAME))
}
