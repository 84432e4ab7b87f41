use std::path::Path;

use crate::environments::java::probe::java_executable;
use crate::error::{AppError, AppResult};

/// Java 环境验证器
pub struct JavaValidator;

impl JavaValidator {
    /// 验证 JAVA_HOME：目录存在，且包含可执行的 bin/java
    pub fn validate_java_home(java_home: &str) -> AppResult<()> {
        let invalid = |reason: String| Err(AppError::invalid("JAVA_HOME", reason));

        let home = Path::new(java_home);
        if !home.exists() {
            return invalid(format!("{java_home} does not exist"));
        }
        if !home.is_dir() {
            return invalid(format!("{java_home} is not a directory"));
        }

        let bin = home.join("bin");
        if !bin.exists() {
            return invalid(format!("{java_home} does not have bin/ subdirectory"));
        }
        if !bin.is_dir() {
            return invalid(format!("{} is not a directory", bin.display()));
        }

        let java = java_executable(home);
        if !java.exists() {
            return invalid(format!("{java_home} does not have bin/java executable"));
        }
        if !java.is_file() {
            return invalid(format!("{} is not a file", java.display()));
        }
        if !Self::is_executable(&java) {
            return invalid(format!("{} is not executable", java.display()));
        }

        Ok(())
    }

    #[cfg(unix)]
    fn is_executable(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        path.metadata()
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(_path: &Path) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn reason(result: AppResult<()>) -> String {
        match result {
            Err(AppError::Validation { reason, .. }) => reason,
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_java_home_errors() {
        assert!(reason(JavaValidator::validate_java_home("/nonexistent/jdk")).contains("does not exist"));

        let dir = TempDir::new().unwrap();
        let home = dir.path().to_string_lossy().to_string();
        assert!(reason(JavaValidator::validate_java_home(&home)).contains("bin/"));

        std::fs::create_dir_all(dir.path().join("bin")).unwrap();
        assert!(reason(JavaValidator::validate_java_home(&home)).contains("bin/java"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_java_home_requires_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let home = dir.path().to_string_lossy().to_string();
        let java = dir.path().join("bin").join("java");
        std::fs::create_dir_all(java.parent().unwrap()).unwrap();
        std::fs::write(&java, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&java, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(reason(JavaValidator::validate_java_home(&home)).contains("not executable"));

        std::fs::set_permissions(&java, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(JavaValidator::validate_java_home(&home).is_ok());
    }
}
