//! 应用程序常量定义
//!
//! 本模块包含全局使用的常量，避免魔数并提供统一的配置值。

/// 文件系统相关常量
pub mod fs {
    /// 目录级版本固定文件
    pub const PIN_FILE_NAME: &str = ".java-version";
    /// 注册表文件名
    pub const REGISTRY_FILE_NAME: &str = "jdkman.json";
    /// 注册表备份文件名
    pub const REGISTRY_BACKUP_FILE_NAME: &str = "jdkman.json.bak";
    /// 设置文件名
    pub const SETTINGS_FILE_NAME: &str = "config.toml";
    /// 默认数据目录名（位于用户主目录下）
    pub const DATA_DIR_NAME: &str = ".jdkman";
    /// 代理脚本目录名（位于数据目录下）
    pub const SCRIPTS_DIR_NAME: &str = "scripts";
    /// JDK 中记录发行信息的文件
    pub const RELEASE_FILE_NAME: &str = "release";
}

/// 环境变量相关常量
pub mod env {
    /// 覆盖数据目录
    pub const JDKMAN_HOME: &str = "JDKMAN_HOME";
    /// 日志过滤器
    pub const JDKMAN_LOG: &str = "JDKMAN_LOG";
    /// Java 主目录
    pub const JAVA_HOME: &str = "JAVA_HOME";
}

/// 探测相关常量
pub mod probe {
    /// `java -version` 默认超时时间（秒）
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// release 文件中的供应商键
    pub const IMPLEMENTOR_KEY: &str = "IMPLEMENTOR";
}

/// 日志相关常量
pub mod log {
    /// 默认日志级别
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

/// JDK bin 目录下需要生成代理脚本的可执行文件
pub const JDK_EXECUTABLES: &[&str] = &[
    // 当前版本
    "jar", "jarsigner", "java", "javac", "javadoc", "javap", "jcmd", "jconsole", "jdb",
    "jdeprscan", "jdeps", "jfr", "jhsdb", "jimage", "jinfo", "jlink", "jmap", "jmod",
    "jpackage", "jps", "jrunscript", "jshell", "jstack", "jstat", "jstatd", "jwebserver",
    "keytool", "rmiregistry", "serialver",
    // 已移除
    "jaotc", "jpackager", "appletviewer", "extcheck", "idlj", "javafxpackager", "javah",
    "javapackager", "jhat", "jjs", "jmc", "jsadebugd", "jvisualvm", "native2ascii", "orbd",
    "pack200", "policytool", "rmic", "rmid", "schemagen", "servertool", "tnameserv",
    "unpack200", "wsgen", "wsimport", "xjc",
    // Java Web Start
    "javaws", "jcontrol", "jweblauncher",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executables_are_unique() {
        let mut names = JDK_EXECUTABLES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), JDK_EXECUTABLES.len());
        assert!(names.contains(&"java"));
    }
}
