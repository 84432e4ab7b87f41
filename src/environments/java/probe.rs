use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::core::constants::{fs, probe};
use crate::environments::java::version::VersionSpec;
use crate::error::{AppError, AppResult};

/// 一次探测得到的原始信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    /// `java -version` 输出的文本
    pub version_output: String,
    /// release 文件中的 IMPLEMENTOR
    pub implementor: Option<String>,
}

/// JDK 探测抽象接口
#[async_trait]
pub trait JdkProber: Send + Sync {
    /// 探测指定 JAVA_HOME 的版本信息
    async fn probe(&self, home: &Path) -> AppResult<ProbeReport>;
}

/// 通过执行 `bin/java -version` 探测
pub struct ProcessProber {
    timeout: Duration,
}

impl Default for ProcessProber {
    fn default() -> Self {
        Self::new(Duration::from_secs(probe::DEFAULT_TIMEOUT_SECS))
    }
}

impl ProcessProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn run_java_version(&self, home: &Path) -> AppResult<String> {
        let java = java_executable(home);
        debug!(java = %java.display(), "running java -version");

        let mut cmd = Command::new(&java);
        cmd.arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(AppError::probe_failed(format!(
                    "无法执行 {}: {e}",
                    java.display()
                )))
            }
            Err(_) => {
                return Err(AppError::probe_failed(format!(
                    "{} -version 在 {} 秒内没有结束",
                    java.display(),
                    self.timeout.as_secs()
                )))
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !output.status.success() {
            return Err(AppError::probe_failed(format!(
                "unable to retrieve java version: {}\nstdout:\n{stdout}\nstderr:\n{stderr}",
                output.status
            )));
        }

        // java -version 写到 stderr，个别发行版写到 stdout
        if stderr.trim().is_empty() {
            Ok(stdout)
        } else {
            Ok(stderr)
        }
    }
}

#[async_trait]
impl JdkProber for ProcessProber {
    async fn probe(&self, home: &Path) -> AppResult<ProbeReport> {
        let version_output = self.run_java_version(home).await?;
        let implementor = read_release_implementor(home).await?;
        Ok(ProbeReport {
            version_output,
            implementor,
        })
    }
}

/// JAVA_HOME 下的 java 可执行文件路径
pub fn java_executable(home: &Path) -> PathBuf {
    let name = if cfg!(target_os = "windows") {
        "java.exe"
    } else {
        "java"
    };
    home.join("bin").join(name)
}

async fn read_release_implementor(home: &Path) -> AppResult<Option<String>> {
    let release = home.join(fs::RELEASE_FILE_NAME);
    if !release.is_file() {
        return Ok(None);
    }
    let content = tokio::fs::read_to_string(&release).await?;
    Ok(parse_release_implementor(&content))
}

/// 从 release 文件内容中提取 IMPLEMENTOR
///
/// 值通常带双引号，按 JSON 字符串解码；解码失败时保留原值。
pub fn parse_release_implementor(content: &str) -> Option<String> {
    let raw = content.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        (key.trim() == probe::IMPLEMENTOR_KEY).then(|| value.trim().to_string())
    })?;

    if raw.starts_with('"') {
        match serde_json::from_str::<String>(&raw) {
            Ok(decoded) => return Some(decoded),
            Err(e) => warn!("implementor field is not a valid json string: {raw}: {e}"),
        }
    }
    Some(raw)
}

/// 解析 `java -version` 的输出
///
/// 第一行引号中的内容为主版本；第二行若有 `(build ...)`，
/// 其主、次、补丁号必须与第一行一致，并以它作为最终结果（包含构建号）。
pub fn parse_version_output(output: &str) -> AppResult<VersionSpec> {
    let mut lines = output.lines().filter(|l| !l.trim().is_empty());
    let first_line = lines
        .next()
        .map(str::trim)
        .ok_or_else(|| AppError::probe_failed(format!("missing java version: empty output\n{output}")))?;

    if !first_line.contains('"') {
        return Err(AppError::probe_failed(format!(
            "missing java version: first line doesn't contain `\"`\n{output}"
        )));
    }
    let version_str = first_line
        .split('"')
        .nth(1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AppError::probe_failed(format!("missing java version: invalid first line\n{output}"))
        })?;
    let version = parse_probed(version_str)?;

    let Some(detailed) = lines.next().and_then(build_token) else {
        return Ok(version);
    };
    let detailed = parse_probed(detailed)?;

    for (name, same) in [
        ("major", version.major_version() == detailed.major_version()),
        ("minor", version.minor_version() == detailed.minor_version()),
        ("patch", version.patch_version() == detailed.patch_version()),
    ] {
        if !same {
            return Err(AppError::probe_failed(format!(
                "{name} version mismatch:\n{output}"
            )));
        }
    }
    Ok(detailed)
}

/// 提取第二行最后一对括号中的 `build xxx`
fn build_token(line: &str) -> Option<&str> {
    let (_, tail) = line.rsplit_once('(')?;
    let (inner, _) = tail.split_once(')')?;
    inner.strip_prefix("build ")
}

fn parse_probed(version: &str) -> AppResult<VersionSpec> {
    VersionSpec::parse(version).map_err(|e| AppError::probe_failed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const JDK8: &str = "java version \"1.8.0_361\"\n\
        Java(TM) SE Runtime Environment (build 1.8.0_361-b09)\n\
        Java HotSpot(TM) 64-Bit Server VM (build 25.361-b09, mixed mode)\n";

    const JDK17: &str = "openjdk version \"17.0.1\" 2021-10-19\n\
        OpenJDK Runtime Environment Temurin-17.0.1+12 (build 17.0.1+12)\n\
        OpenJDK 64-Bit Server VM Temurin-17.0.1+12 (build 17.0.1+12, mixed mode, sharing)\n";

    const JDK17_GA: &str = "openjdk version \"17\" 2021-09-14\n\
        OpenJDK Runtime Environment (build 17+35-2724)\n\
        OpenJDK 64-Bit Server VM (build 17+35-2724, mixed mode, sharing)\n";

    #[test]
    fn test_parse_jdk8_output() {
        let spec = parse_version_output(JDK8).unwrap();
        assert_eq!(spec.major_version(), 1);
        assert_eq!(spec.minor_version(), Some(8));
        assert_eq!(spec.patch_version(), Some(0));
        assert_eq!(spec.build_version(), Some("361-b09"));
        assert_eq!(spec.full_version(), "1.8.0_361-b09");
    }

    #[test]
    fn test_parse_jdk17_output() {
        let spec = parse_version_output(JDK17).unwrap();
        assert_eq!(spec.major_version(), 17);
        assert_eq!(spec.patch_version(), Some(1));
        assert_eq!(spec.build_version(), Some("12"));
    }

    #[test]
    fn test_parse_ga_output_without_minor() {
        let spec = parse_version_output(JDK17_GA).unwrap();
        assert_eq!(spec.major_version(), 17);
        assert_eq!(spec.minor_version(), None);
        assert_eq!(spec.build_version(), Some("35-2724"));
    }

    #[test]
    fn test_parse_single_line_output() {
        let spec = parse_version_output("openjdk version \"21.0.2\" 2024-01-16\n").unwrap();
        assert_eq!(spec.major_version(), 21);
        assert_eq!(spec.build_version(), None);
    }

    #[test]
    fn test_second_line_without_build_is_ignored() {
        let output = "openjdk version \"11.0.2\"\nsome banner (not a build)\n";
        let spec = parse_version_output(output).unwrap();
        assert_eq!(spec.full_version(), "11.0.2");
    }

    #[test]
    fn test_mismatched_build_line_fails() {
        let output = "openjdk version \"17.0.1\"\nOpenJDK Runtime Environment (build 17.0.2+8)\n";
        match parse_version_output(output) {
            Err(AppError::Probe { message }) => assert!(message.contains("patch version mismatch")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_outputs_fail() {
        assert!(parse_version_output("").is_err());
        assert!(parse_version_output("no quotes here").is_err());
        assert!(parse_version_output("java version \"\"").is_err());
        assert!(parse_version_output("java version \"abc\"").is_err());
    }

    #[test]
    fn test_parse_release_implementor() {
        let release = "JAVA_VERSION=\"17.0.1\"\nIMPLEMENTOR=\"Eclipse Adoptium\"\n";
        assert_eq!(
            parse_release_implementor(release),
            Some("Eclipse Adoptium".to_string())
        );
        assert_eq!(
            parse_release_implementor("IMPLEMENTOR=Oracle Corporation\n"),
            Some("Oracle Corporation".to_string())
        );
        assert_eq!(
            parse_release_implementor("IMPLEMENTOR=\"broken\n"),
            Some("\"broken".to_string())
        );
        assert_eq!(parse_release_implementor("JAVA_VERSION=\"17\"\n"), None);
    }

    #[tokio::test]
    async fn test_process_prober_reports_missing_java() {
        let dir = TempDir::new().unwrap();
        let prober = ProcessProber::new(Duration::from_secs(1));
        let result = prober.probe(dir.path()).await;
        assert!(matches!(result, Err(AppError::Probe { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_prober_runs_java_script() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let java = bin.join("java");
        std::fs::write(
            &java,
            "#!/bin/sh\necho 'openjdk version \"21.0.2\" 2024-01-16' >&2\n",
        )
        .unwrap();
        std::fs::set_permissions(&java, std::fs::Permissions::from_mode(0o755)).unwrap();
        std::fs::write(dir.path().join("release"), "IMPLEMENTOR=\"Eclipse Adoptium\"\n").unwrap();

        let report = ProcessProber::default().probe(dir.path()).await.unwrap();
        assert!(report.version_output.contains("21.0.2"));
        assert_eq!(report.implementor.as_deref(), Some("Eclipse Adoptium"));
    }
}
