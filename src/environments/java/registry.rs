use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::environments::java::probe::{parse_version_output, JdkProber};
use crate::environments::java::record::{sort_descending, JdkRecord};
use crate::error::{AppError, AppResult};

/// JDK 注册表：所有已知的 JDK 以及默认 JDK
///
/// 由当前命令独占持有，修改后由调用方决定是否持久化。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(rename = "defaultJDK", default)]
    pub default_jdk: Option<String>,
    #[serde(default)]
    pub jdks: Vec<JdkRecord>,
}

/// `refresh` 的执行结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// JAVA_HOME 已不存在而被移除的记录
    pub removed: Vec<String>,
    /// 重新探测成功的 JAVA_HOME
    pub readded: Vec<String>,
    /// 重新探测失败而被丢弃的 JAVA_HOME
    pub failed: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.jdks.is_empty()
    }

    /// 根据 id 查找
    pub fn get(&self, id: &str) -> Option<&JdkRecord> {
        self.jdks.iter().find(|jdk| jdk.id == id)
    }

    /// 默认 JDK（id 存在时）
    pub fn default_record(&self) -> Option<&JdkRecord> {
        self.default_jdk.as_deref().and_then(|id| self.get(id))
    }

    pub fn is_default(&self, id: &str) -> bool {
        self.default_jdk.as_deref() == Some(id)
    }

    /// 注册一个新的 JDK，返回新记录的 id
    ///
    /// 探测或解析失败时注册表保持不变。
    pub async fn add(&mut self, home: &Path, prober: &dyn JdkProber) -> AppResult<String> {
        let canonical = home.canonicalize()?;
        let java_home = canonical.to_string_lossy().to_string();
        if self.jdks.iter().any(|jdk| jdk.home == java_home) {
            return Err(AppError::Duplicate { home: java_home });
        }

        let report = prober.probe(&canonical).await?;
        let version = parse_version_output(&report.version_output)?;

        let id = Uuid::new_v4().to_string();
        let record = JdkRecord::from_spec(id.clone(), &version, report.implementor, java_home);
        info!(id = %record.id, home = %record.home, version = %record.full_version, "jdk registered");

        self.jdks.push(record);
        sort_descending(&mut self.jdks);
        if self.default_jdk.is_none() {
            self.default_jdk = Some(id.clone());
        }
        Ok(id)
    }

    /// 删除指定 id 的 JDK，若为默认 JDK 则改为当前排序第一的记录
    pub fn remove(&mut self, id: &str) -> AppResult<JdkRecord> {
        let index = self
            .jdks
            .iter()
            .position(|jdk| jdk.id == id)
            .ok_or_else(|| AppError::jdk_not_found(id))?;
        let removed = self.jdks.remove(index);

        if self.is_default(id) {
            self.default_jdk = self.jdks.first().map(|jdk| jdk.id.clone());
        }
        Ok(removed)
    }

    /// 设置默认 JDK
    pub fn set_default(&mut self, id: &str) -> AppResult<()> {
        if self.get(id).is_none() {
            return Err(AppError::jdk_not_found(id));
        }
        self.default_jdk = Some(id.to_string());
        Ok(())
    }

    /// 重新探测所有 JDK
    ///
    /// JAVA_HOME 已不存在的记录被移除；其余记录重新注册（id 会变化），
    /// 默认 JDK 按 JAVA_HOME 路径保留。
    pub async fn refresh(&mut self, prober: &dyn JdkProber) -> RefreshReport {
        let mut report = RefreshReport::default();
        let old_default_home = self.default_record().map(|jdk| jdk.home.clone());

        let mut homes = Vec::new();
        for jdk in &self.jdks {
            if Path::new(&jdk.home).exists() {
                homes.push(jdk.home.clone());
            } else {
                warn!(id = %jdk.id, home = %jdk.home, "jdk is removed");
                report.removed.push(jdk.home.clone());
            }
        }

        let mut refreshed = Registry::new();
        for home in homes {
            match refreshed.add(Path::new(&home), prober).await {
                Ok(_) => {
                    info!(home = %home, "jdk is re-added");
                    report.readded.push(home);
                }
                Err(e) => {
                    error!(home = %home, "failed to re-add jdk: {e}");
                    report.failed.push(home);
                }
            }
        }

        if let Some(old_home) = old_default_home {
            if let Some(jdk) = refreshed.jdks.iter().find(|jdk| jdk.home == old_home) {
                refreshed.default_jdk = Some(jdk.id.clone());
            }
        }

        *self = refreshed;
        report
    }
}
