use crate::environments::java::record::JdkRecord;
use crate::environments::java::version::VersionSpec;

/// 单次匹配的严格程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub match_major_version: bool,
    pub match_build_version: bool,
    pub match_implementor: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::all(true)
    }
}

impl MatchOptions {
    pub const fn all(value: bool) -> Self {
        Self {
            match_major_version: value,
            match_build_version: value,
            match_implementor: value,
        }
    }

    pub const fn with_match_major_version(mut self, value: bool) -> Self {
        self.match_major_version = value;
        self
    }

    pub const fn with_match_build_version(mut self, value: bool) -> Self {
        self.match_build_version = value;
        self
    }

    pub const fn with_match_implementor(mut self, value: bool) -> Self {
        self.match_implementor = value;
        self
    }
}

/// 级联匹配依次尝试的严格程度，从最严格到最宽松
pub const STRICTNESS_TIERS: [MatchOptions; 4] = [
    MatchOptions::all(true),
    MatchOptions::all(true).with_match_build_version(false),
    MatchOptions::all(true)
        .with_match_build_version(false)
        .with_match_implementor(false),
    MatchOptions::all(false),
];

impl VersionSpec {
    /// 判断记录是否满足版本表达式
    ///
    /// 数字部分视为下限：记录的版本不能低于表达式给出的版本。
    /// `1.x` 旧式版本的真实主版本号位于 minor 位置，需要单独处理。
    pub fn matches(&self, record: &JdkRecord, opts: MatchOptions) -> bool {
        if opts.match_implementor {
            if let Some(implementor) = self.implementor() {
                if record.implementor.as_deref() != Some(implementor) {
                    return false;
                }
            }
        }

        let major = self.major_version();
        let minor = self.minor_version();

        if opts.match_major_version {
            if major != record.major_version {
                return false;
            }
            // 1.7.x、1.8.x 这类版本 minor 是关键
            if major == 1 && minor.is_some_and(|m| m != record.minor_version) {
                return false;
            }
        } else {
            if major > record.major_version {
                return false;
            }
            if major == 1
                && record.major_version == 1
                && minor.is_some_and(|m| m > record.minor_version)
            {
                return false;
            }
        }

        // 11.x.x、21.x.x 这类版本 minor 不是关键
        if major != 1 && minor.is_some_and(|m| m > record.minor_version) {
            return false;
        }

        // 仅在 minor 相同时比较补丁号
        if let Some(patch) = self.patch_version() {
            if patch > record.patch_version && minor == Some(record.minor_version) {
                return false;
            }
        }

        if opts.match_build_version {
            if let Some(build) = self.build_version() {
                if record.build_version.as_deref() != Some(build) {
                    return false;
                }
            }
        }

        true
    }
}

/// 按严格程度级联查找最合适的 JDK
///
/// 第一个有命中的层级生效，命中记录按版本升序稳定排序后取最低的一个，
/// 即满足要求的最接近的安装。
pub fn resolve<'a>(spec: &VersionSpec, records: &'a [JdkRecord]) -> Option<&'a JdkRecord> {
    for opts in STRICTNESS_TIERS {
        let mut candidates: Vec<&JdkRecord> =
            records.iter().filter(|r| spec.matches(r, opts)).collect();
        if candidates.is_empty() {
            continue;
        }
        candidates.sort_by(|a, b| a.version_cmp(b));
        tracing::debug!(
            spec = %spec,
            tier = ?opts,
            candidates = candidates.len(),
            "matched jdk candidates"
        );
        return candidates.first().copied();
    }
    None
}
