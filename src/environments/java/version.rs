use crate::error::{AppError, AppResult};

/// 解析后的版本表达式
///
/// 既用于描述已注册 JDK 的版本，也用于 `.java-version` 等查询字符串。
/// 语法: `[implementor:]major[.minor[.patch]][(+|_)build]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    implementor: Option<String>,
    major_version: u32,
    minor_version: Option<u32>,
    patch_version: Option<u32>,
    build_version: Option<String>,
    full_version: String,
}

impl VersionSpec {
    /// 创建版本表达式
    ///
    /// # Panics
    ///
    /// 指定了 patch 却缺少 minor 时 panic，这属于调用方的编程错误。
    pub fn new(
        implementor: Option<String>,
        major_version: u32,
        minor_version: Option<u32>,
        patch_version: Option<u32>,
        build_version: Option<String>,
        full_version: impl Into<String>,
    ) -> Self {
        assert!(
            patch_version.is_none() || minor_version.is_some(),
            "patch version ({patch_version:?}) is specified but missing minor version"
        );
        Self {
            implementor,
            major_version,
            minor_version,
            patch_version,
            build_version,
            full_version: full_version.into(),
        }
    }

    /// 解析版本字符串
    pub fn parse(raw: &str) -> AppResult<Self> {
        let (implementor, version_part) = match raw.split_once(':') {
            Some((implementor, rest)) => (Some(implementor.to_string()), rest),
            None => (None, raw),
        };

        // `+` 优先于 `_`，例如 11.0.2+9 与 1.8.0_361
        let (core, build_version) = if let Some((core, build)) = version_part.split_once('+') {
            (core, Some(build.to_string()))
        } else if let Some((core, build)) = version_part.split_once('_') {
            (core, Some(build.to_string()))
        } else {
            (version_part, None)
        };

        let mut segments: Vec<&str> = core.split('.').collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }
        if segments.is_empty() {
            return Err(AppError::version_parse_failed(core, "empty string"));
        }

        let major_version = parse_segment(core, "major", segments[0])?;
        let minor_version = segments
            .get(1)
            .map(|s| parse_segment(core, "minor", s))
            .transpose()?;
        let patch_version = segments
            .get(2)
            .map(|s| parse_segment(core, "patch", s))
            .transpose()?;

        Ok(Self::new(
            implementor,
            major_version,
            minor_version,
            patch_version,
            build_version,
            raw,
        ))
    }

    pub fn implementor(&self) -> Option<&str> {
        self.implementor.as_deref()
    }

    pub fn major_version(&self) -> u32 {
        self.major_version
    }

    pub fn minor_version(&self) -> Option<u32> {
        self.minor_version
    }

    pub fn patch_version(&self) -> Option<u32> {
        self.patch_version
    }

    pub fn build_version(&self) -> Option<&str> {
        self.build_version.as_deref()
    }

    pub fn full_version(&self) -> &str {
        &self.full_version
    }
}

impl std::str::FromStr for VersionSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_version)
    }
}

fn parse_segment(core: &str, name: &str, segment: &str) -> AppResult<u32> {
    let invalid =
        || AppError::version_parse_failed(core, format!("{name} version not valid: {segment}"));
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    segment.parse::<u32>().map_err(|_| invalid())
}
