use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::core::constants::JDK_EXECUTABLES;
use crate::error::{AppError, AppResult};
use crate::infrastructure::shell::platform::{
    is_windows, path_separator, quote_powershell, quote_sh, ShellType,
};

/// 生成 `init` 输出的 eval 脚本以及代理脚本
///
/// 代理脚本放在 PATH 最前面，每次调用都通过 `jdkman which` 重新解析 JAVA_HOME，
/// 因此切换目录后无需重新初始化。
pub struct ScriptBuilder {
    scripts_dir: PathBuf,
    program: String,
}

impl ScriptBuilder {
    pub fn new(scripts_dir: PathBuf) -> Self {
        Self {
            scripts_dir,
            program: env!("CARGO_PKG_NAME").to_string(),
        }
    }

    /// 单个可执行文件的 sh 代理脚本
    pub fn launcher_script(&self, exe: &str) -> String {
        format!(
            "#!/bin/sh\nset -e\nJAVA_HOME=\"$({program} which)\"\nexport JAVA_HOME\nexec \"$JAVA_HOME/bin/{exe}\" \"$@\"\n",
            program = self.program,
        )
    }

    /// 写入全部代理脚本，返回成功写入的文件
    ///
    /// 单个文件失败只记录日志；Windows 上由 PowerShell 函数代理，不写文件。
    pub fn install_launchers(&self) -> AppResult<Vec<PathBuf>> {
        self.ensure_scripts_dir()?;
        if is_windows() {
            debug!("skip launcher scripts on windows");
            return Ok(Vec::new());
        }

        let mut written = Vec::new();
        for exe in JDK_EXECUTABLES {
            let path = self.scripts_dir.join(exe);
            if path.exists() && !path.is_file() {
                error!(path = %path.display(), "launcher path is not a valid file");
                continue;
            }
            match self.write_launcher(&path, exe) {
                Ok(()) => written.push(path),
                Err(e) => error!(path = %path.display(), "failed to create launcher: {e}"),
            }
        }
        debug!(count = written.len(), dir = %self.scripts_dir.display(), "launchers installed");
        Ok(written)
    }

    fn ensure_scripts_dir(&self) -> AppResult<()> {
        if self.scripts_dir.exists() {
            if !self.scripts_dir.is_dir() {
                return Err(AppError::Config {
                    message: format!("{} is not a directory", self.scripts_dir.display()),
                });
            }
            return Ok(());
        }
        std::fs::create_dir_all(&self.scripts_dir)?;
        Ok(())
    }

    fn write_launcher(&self, path: &Path, exe: &str) -> std::io::Result<()> {
        std::fs::write(path, self.launcher_script(exe))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
        }
        Ok(())
    }

    /// 生成需要被 shell eval 的初始化脚本
    pub fn eval_script(&self, shell: ShellType) -> String {
        match shell {
            ShellType::Sh => self.sh_eval_script(),
            ShellType::PowerShell => self.powershell_eval_script(),
        }
    }

    fn sh_eval_script(&self) -> String {
        let dir = quote_sh(&self.scripts_dir.to_string_lossy());
        let program = &self.program;
        format!(
            r#"export PATH={dir}:"$PATH"
cdjh() {{
    builtin cd "$@" || return
    JAVA_HOME="$({program} which)"
    export JAVA_HOME
}}
alias cd=cdjh
JAVA_HOME="$({program} which)"
export JAVA_HOME"#
        )
    }

    fn powershell_eval_script(&self) -> String {
        let program = &self.program;
        let suffix = if is_windows() { ".exe" } else { "" };

        let mut script = String::new();
        for exe in JDK_EXECUTABLES {
            let _ = writeln!(script, "function {exe} {{");
            let _ = writeln!(script, "    $env:JAVA_HOME = {program} which");
            let _ = writeln!(script, "    & \"$env:JAVA_HOME/bin/{exe}{suffix}\" $args");
            script.push_str("}\n");
        }

        let dir = quote_powershell(&self.scripts_dir.to_string_lossy());
        let _ = write!(
            script,
            r#"$env:PATH = {dir} + '{sep}' + $env:PATH
$env:JAVA_HOME = {program} which
function cdjh {{
    param([string]$path)
    Set-Location $path
    $env:JAVA_HOME = {program} which
}}
Set-Alias -Name cd -Value cdjh -Option AllScope"#,
            sep = path_separator(),
        );
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_launcher_script() {
        let builder = ScriptBuilder::new(PathBuf::from("/data/scripts"));
        let script = builder.launcher_script("javac");
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("JAVA_HOME=\"$(jdkman which)\""));
        assert!(script.ends_with("exec \"$JAVA_HOME/bin/javac\" \"$@\"\n"));
    }

    #[test]
    fn test_sh_eval_script() {
        let builder = ScriptBuilder::new(PathBuf::from("/data/my scripts"));
        let script = builder.eval_script(ShellType::Sh);
        assert!(script.starts_with("export PATH='/data/my scripts':\"$PATH\""));
        assert!(script.contains("alias cd=cdjh"));
        assert!(script.ends_with("export JAVA_HOME"));
    }

    #[test]
    fn test_powershell_eval_script() {
        let builder = ScriptBuilder::new(PathBuf::from("/data/scripts"));
        let script = builder.eval_script(ShellType::PowerShell);
        assert!(script.contains("function java {"));
        assert!(script.contains("function jshell {"));
        assert!(script.contains("$env:PATH = '/data/scripts'"));
        assert!(script.contains("Set-Alias -Name cd -Value cdjh -Option AllScope"));
    }

    #[cfg(unix)]
    #[test]
    fn test_install_launchers() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let builder = ScriptBuilder::new(root.path().join("scripts"));
        let written = builder.install_launchers().unwrap();
        assert_eq!(written.len(), JDK_EXECUTABLES.len());

        let java = root.path().join("scripts").join("java");
        let content = std::fs::read_to_string(&java).unwrap();
        assert_eq!(content, builder.launcher_script("java"));
        let mode = java.metadata().unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);

        // 再次执行会覆盖已有脚本
        assert_eq!(builder.install_launchers().unwrap().len(), JDK_EXECUTABLES.len());
    }

    #[cfg(unix)]
    #[test]
    fn test_install_launchers_skips_directories() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("java")).unwrap();
        let builder = ScriptBuilder::new(root.path().to_path_buf());
        let written = builder.install_launchers().unwrap();
        assert_eq!(written.len(), JDK_EXECUTABLES.len() - 1);
        assert!(root.path().join("java").is_dir());
    }

    #[test]
    fn test_scripts_dir_must_be_directory() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("scripts");
        std::fs::write(&file, "").unwrap();
        let builder = ScriptBuilder::new(file);
        assert!(matches!(
            builder.install_launchers(),
            Err(AppError::Config { .. })
        ));
    }
}
