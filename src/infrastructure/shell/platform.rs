use clap::ValueEnum;
use std::env;
use std::fmt;

/// `init` 支持的 Shell 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellType {
    /// POSIX shell（bash、zsh 等）
    #[value(name = "sh")]
    Sh,
    /// PowerShell
    #[value(name = "pwsh")]
    PowerShell,
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellType::Sh => write!(f, "sh"),
            ShellType::PowerShell => write!(f, "pwsh"),
        }
    }
}

/// 是否运行在 Windows 上
pub fn is_windows() -> bool {
    env::consts::OS == "windows"
}

/// 未显式指定时使用的 Shell：Windows 上为 PowerShell，其余为 sh
pub fn detect_shell() -> ShellType {
    if is_windows() {
        ShellType::PowerShell
    } else {
        ShellType::Sh
    }
}

/// 单引号包裹的 sh 字符串
pub fn quote_sh(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// 单引号包裹的 PowerShell 字符串
pub fn quote_powershell(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// PATH 分隔符
pub fn path_separator() -> &'static str {
    if is_windows() {
        ";"
    } else {
        ":"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_shell_matches_platform() {
        let shell = detect_shell();
        if cfg!(windows) {
            assert_eq!(shell, ShellType::PowerShell);
        } else {
            assert_eq!(shell, ShellType::Sh);
        }
    }

    #[test]
    fn test_shell_type_names() {
        assert_eq!(ShellType::from_str("sh", false).unwrap(), ShellType::Sh);
        assert_eq!(ShellType::from_str("pwsh", false).unwrap(), ShellType::PowerShell);
        assert!(ShellType::from_str("fish", false).is_err());
        assert_eq!(ShellType::PowerShell.to_string(), "pwsh");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote_sh("/opt/jdk"), "'/opt/jdk'");
        assert_eq!(quote_sh("it's"), "'it'\\''s'");
        assert_eq!(quote_powershell("C:\\it's"), "'C:\\it''s'");
    }
}
