use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::environments::java::version::VersionSpec;

/// 已注册的 JDK
///
/// 注册后不会原地修改，`refresh` 会用重新探测得到的新记录整体替换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdkRecord {
    pub id: String,
    pub major_version: u32,
    #[serde(default)]
    pub minor_version: u32,
    #[serde(default)]
    pub patch_version: u32,
    #[serde(default)]
    pub build_version: Option<String>,
    pub full_version: String,
    #[serde(default)]
    pub implementor: Option<String>,
    pub home: String,
}

impl JdkRecord {
    /// 根据探测到的版本创建记录，缺省的次版本号和补丁号记为 0
    pub fn from_spec(
        id: String,
        spec: &VersionSpec,
        implementor: Option<String>,
        home: String,
    ) -> Self {
        Self {
            id,
            major_version: spec.major_version(),
            minor_version: spec.minor_version().unwrap_or(0),
            patch_version: spec.patch_version().unwrap_or(0),
            build_version: spec.build_version().map(str::to_string),
            full_version: spec.full_version().to_string(),
            implementor,
            home,
        }
    }

    /// 版本全序：主、次、补丁号升序；其余相同时有构建号的更高，再有供应商的更高
    ///
    /// 完全相同时返回 `Equal`，调用方统一使用稳定排序，相等记录保持原有顺序。
    pub fn version_cmp(&self, other: &JdkRecord) -> Ordering {
        self.major_version
            .cmp(&other.major_version)
            .then(self.minor_version.cmp(&other.minor_version))
            .then(self.patch_version.cmp(&other.patch_version))
            .then(self.build_version.is_some().cmp(&other.build_version.is_some()))
            .then(self.implementor.is_some().cmp(&other.implementor.is_some()))
    }

    /// 用于列表展示的短版本号，例如 `17`、`17.0.1`、`1.8`
    pub fn display_version(&self) -> String {
        let mut version = self.major_version.to_string();
        if self.minor_version != 0 || self.patch_version != 0 {
            version.push_str(&format!(".{}", self.minor_version));
        }
        if self.patch_version != 0 {
            version.push_str(&format!(".{}", self.patch_version));
        }
        version
    }
}

/// 按版本从高到低稳定排序
pub fn sort_descending(records: &mut [JdkRecord]) {
    records.sort_by(|a, b| b.version_cmp(a));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: &str, version: &str, implementor: Option<&str>) -> JdkRecord {
        let spec = VersionSpec::parse(version).unwrap();
        JdkRecord::from_spec(
            id.to_string(),
            &spec,
            implementor.map(str::to_string),
            format!("/jdks/{id}"),
        )
    }

    #[test]
    fn test_from_spec_defaults() {
        let r = record("a", "17", None);
        assert_eq!(r.minor_version, 0);
        assert_eq!(r.patch_version, 0);
        assert_eq!(r.build_version, None);
        assert_eq!(r.full_version, "17");
    }

    #[test]
    fn test_version_cmp_keys() {
        let base = record("a", "17.0.1", None);
        assert_eq!(base.version_cmp(&record("b", "17.0.1", None)), Ordering::Equal);
        assert_eq!(base.version_cmp(&record("b", "21", None)), Ordering::Less);
        assert_eq!(base.version_cmp(&record("b", "17.1", None)), Ordering::Less);
        assert_eq!(base.version_cmp(&record("b", "17.0.0", None)), Ordering::Greater);
        assert_eq!(base.version_cmp(&record("b", "17.0.1+12", None)), Ordering::Less);
        assert_eq!(base.version_cmp(&record("b", "17.0.1", Some("x"))), Ordering::Less);
        assert_eq!(
            record("a", "17.0.1+12", None).version_cmp(&record("b", "17.0.1", Some("x"))),
            Ordering::Greater
        );
    }

    #[test]
    fn test_version_cmp_is_transitive_over_sample() {
        let sample = [
            record("a", "1.8.0_361", None),
            record("b", "11.0.2+9", Some("vendor")),
            record("c", "11.0.2", None),
            record("d", "17", None),
            record("e", "17.0.1+12", Some("temurin")),
            record("f", "17.0.1", Some("temurin")),
            record("g", "21", None),
        ];
        for a in &sample {
            assert_eq!(a.version_cmp(a), Ordering::Equal);
            for b in &sample {
                assert_eq!(a.version_cmp(b), b.version_cmp(a).reverse());
                for c in &sample {
                    if a.version_cmp(b) != Ordering::Greater
                        && b.version_cmp(c) != Ordering::Greater
                    {
                        assert_ne!(a.version_cmp(c), Ordering::Greater);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_descending_is_idempotent_and_stable() {
        let mut records = vec![
            record("a", "11", None),
            record("b", "17", None),
            record("c", "11", None),
            record("d", "21", None),
        ];
        sort_descending(&mut records);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["d", "b", "a", "c"]);

        let once = records.clone();
        sort_descending(&mut records);
        assert_eq!(records, once);
    }

    #[test]
    fn test_display_version() {
        assert_eq!(record("a", "17", None).display_version(), "17");
        assert_eq!(record("a", "1.8.0_361", None).display_version(), "1.8");
        assert_eq!(record("a", "17.0.1", None).display_version(), "17.0.1");
        assert_eq!(record("a", "11.2.3", None).display_version(), "11.2.3");
    }

    #[test]
    fn test_serialized_shape() {
        let r = record("a", "17.0.1+12", None);
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["majorVersion"], 17);
        assert_eq!(value["patchVersion"], 1);
        assert_eq!(value["buildVersion"], "12");
        assert!(value["implementor"].is_null());
        assert_eq!(value["fullVersion"], "17.0.1+12");
        assert_eq!(value["home"], "/jdks/a");
    }
}
