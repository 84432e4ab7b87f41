use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants::fs;
use crate::environments::java::Registry;
use crate::error::AppError;
use crate::infrastructure::config::Settings;

/// 配置仓储抽象接口
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// 加载 JDK 注册表
    async fn load_registry(&self) -> Result<Registry, AppError>;

    /// 保存 JDK 注册表
    async fn save_registry(&self, registry: &Registry) -> Result<(), AppError>;

    /// 加载设置
    async fn load_settings(&self) -> Result<Settings, AppError>;

    /// 数据目录
    fn data_dir(&self) -> &Path;
}

/// 基于文件的配置仓储实现
pub struct FileSystemConfigRepository {
    data_dir: PathBuf,
}

impl FileSystemConfigRepository {
    /// 创建新的文件系统配置仓储
    pub fn new(data_dir: PathBuf) -> Result<Self, AppError> {
        // 确保配置目录存在
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// 获取注册表文件路径
    pub fn registry_path(&self) -> PathBuf {
        self.data_dir.join(fs::REGISTRY_FILE_NAME)
    }

    fn backup_path(&self) -> PathBuf {
        self.data_dir.join(fs::REGISTRY_BACKUP_FILE_NAME)
    }

    /// 获取设置文件路径
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(fs::SETTINGS_FILE_NAME)
    }

    /// 写入文件：先写临时文件再替换，旧文件保留为备份
    async fn write_with_backup(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;

        if path.exists() {
            tokio::fs::copy(path, self.backup_path()).await?;
        }
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl ConfigRepository for FileSystemConfigRepository {
    async fn load_registry(&self) -> Result<Registry, AppError> {
        let path = self.registry_path();
        if !path.exists() {
            // 首次使用时创建空注册表
            let registry = Registry::new();
            self.save_registry(&registry).await?;
            return Ok(registry);
        }

        let content = tokio::fs::read_to_string(&path).await?;
        serde_json::from_str(&content).map_err(|e| AppError::Config {
            message: format!("invalid jdkman config file {}: {e}", path.display()),
        })
    }

    async fn save_registry(&self, registry: &Registry) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(registry)?;
        self.write_with_backup(&self.registry_path(), &content).await?;
        debug!(path = %self.registry_path().display(), "registry persisted");
        Ok(())
    }

    async fn load_settings(&self) -> Result<Settings, AppError> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = tokio::fs::read_to_string(&path).await?;
        Settings::from_toml(&content)
    }

    fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
