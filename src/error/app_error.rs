use std::io;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),

    #[error("版本解析错误: {version} - {reason}")]
    VersionParse { version: String, reason: String },

    #[error("未找到 JDK: {id}")]
    NotFound { id: String },

    #[error("JAVA_HOME {home} 已经注册过")]
    Duplicate { home: String },

    #[error("获取 Java 版本失败: {message}")]
    Probe { message: String },

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("配置错误: {message}")]
    Config { message: String },

    #[error("验证错误: {field} - {reason}")]
    Validation { field: String, reason: String },
}

/// 用于提供错误上下文和用户友好建议
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub operation: String,
    pub suggestions: Vec<String>,
}

impl AppError {
    /// 为错误添加上下文信息
    pub fn with_context(self, operation: &str) -> ContextualError {
        let suggestions = self.default_suggestions();
        ContextualError {
            error: self,
            context: ErrorContext {
                operation: operation.to_string(),
                suggestions,
            },
        }
    }

    fn default_suggestions(&self) -> Vec<String> {
        let hints: &[&str] = match self {
            AppError::NotFound { .. } => &["使用 `jdkman list` 查看已注册的 JDK id"],
            AppError::Duplicate { .. } => &["使用 `jdkman refresh` 更新已注册 JDK 的版本信息"],
            AppError::Probe { .. } => &["确认该目录下的 bin/java 可以正常执行 `java -version`"],
            AppError::VersionParse { .. } => {
                &["版本格式示例: 17, 1.8.0_361, 11.0.2+9, temurin:17.0.1+12"]
            }
            _ => &[],
        };
        hints.iter().map(|s| s.to_string()).collect()
    }
}

/// 带有上下文的错误
#[derive(Error, Debug)]
pub struct ContextualError {
    #[source]
    pub error: AppError,
    pub context: ErrorContext,
}

impl std::fmt::Display for ContextualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "操作失败: {}\n错误: {}", self.context.operation, self.error)
    }
}

impl ContextualError {
    /// 获取用户友好的错误消息
    pub fn user_message(&self) -> String {
        let mut msg = format!("❌ {}\n", self.context.operation);
        msg.push_str(&format!("原因: {}\n", self.error));

        if !self.context.suggestions.is_empty() {
            msg.push_str("💡 建议:\n");
            for suggestion in &self.context.suggestions {
                msg.push_str(&format!("  • {}\n", suggestion));
            }
        }

        msg
    }
}

/// 应用程序 Result 类型
pub type AppResult<T> = Result<T, AppError>;
pub type ContextualResult<T> = Result<T, ContextualError>;

/// 便捷的错误创建函数
impl AppError {
    pub fn version_parse_failed(version: &str, reason: impl Into<String>) -> Self {
        Self::VersionParse {
            version: version.to_string(),
            reason: reason.into(),
        }
    }

    pub fn jdk_not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    pub fn probe_failed(message: impl Into<String>) -> Self {
        Self::Probe {
            message: message.into(),
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<AppError> for ContextualError {
    fn from(error: AppError) -> Self {
        let suggestions = error.default_suggestions();
        Self {
            error,
            context: ErrorContext {
                operation: "未知操作".to_string(),
                suggestions,
            },
        }
    }
}
