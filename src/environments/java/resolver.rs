use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::constants::fs;
use crate::environments::java::matcher::resolve;
use crate::environments::java::record::JdkRecord;
use crate::environments::java::registry::Registry;
use crate::environments::java::version::VersionSpec;
use crate::error::AppResult;

type Decoder = fn(&[u8]) -> Option<String>;

/// 读取固定文件时依次尝试的编码
const DECODERS: [(&str, Decoder); 4] = [
    ("UTF-8", decode_utf8),
    ("UTF-16LE", decode_utf16le),
    ("UTF-16BE", decode_utf16be),
    ("BOM", decode_with_bom),
];

/// 找到的目录级版本固定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedVersion {
    /// `.java-version` 文件路径
    pub file: PathBuf,
    pub spec: VersionSpec,
}

/// 从当前工作目录开始解析应使用的 JDK
pub fn current_version(registry: &Registry) -> AppResult<Option<&JdkRecord>> {
    let cwd = std::env::current_dir()?.canonicalize()?;
    Ok(current_version_from(&cwd, registry))
}

/// 从指定目录开始解析应使用的 JDK
///
/// 顺序：目录固定版本的匹配结果 > 默认 JDK > 注册表中版本最高的 JDK。
pub fn current_version_from<'a>(start: &Path, registry: &'a Registry) -> Option<&'a JdkRecord> {
    if let Some(pinned) = find_pinned_version(start) {
        if let Some(jdk) = resolve(&pinned.spec, &registry.jdks) {
            debug!(file = %pinned.file.display(), id = %jdk.id, "using pinned jdk");
            return Some(jdk);
        }
        debug!(
            file = %pinned.file.display(),
            spec = %pinned.spec,
            "no registered jdk matches pinned version"
        );
    }

    if let Some(jdk) = registry.default_record() {
        return Some(jdk);
    }

    let first = registry.jdks.first()?;
    warn!(
        default = ?registry.default_jdk,
        "unable to find default jdk, falling back to {}",
        first.id
    );
    Some(first)
}

/// 向上逐级查找第一个可以解析的 `.java-version`
///
/// 读取或解析失败只记录日志并继续向上查找。
pub fn find_pinned_version(start: &Path) -> Option<PinnedVersion> {
    for dir in start.ancestors() {
        let file = dir.join(fs::PIN_FILE_NAME);
        if !file.is_file() {
            continue;
        }

        let bytes = match std::fs::read(&file) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(file = %file.display(), "failed to read version file: {e}");
                continue;
            }
        };

        match decode_pin(&bytes) {
            Ok(spec) => return Some(PinnedVersion { file, spec }),
            Err(errors) => {
                warn!(
                    file = %file.display(),
                    "failed to retrieve current version from file: {}",
                    errors.join("; ")
                );
            }
        }
    }
    None
}

/// 依次尝试各种编码，返回第一个可以解析的版本；全部失败时返回每次的错误
fn decode_pin(bytes: &[u8]) -> Result<VersionSpec, Vec<String>> {
    let mut errors = Vec::new();
    for (charset, decode) in DECODERS {
        let Some(content) = decode(bytes) else {
            errors.push(format!("unable to decode bytes with {charset}"));
            continue;
        };
        match VersionSpec::parse(content.trim()) {
            Ok(spec) => return Ok(spec),
            Err(e) => {
                debug!(charset, content = content.trim(), "unable to parse version file");
                errors.push(format!("{charset}: {e}"));
            }
        }
    }
    Err(errors)
}

fn decode_utf8(bytes: &[u8]) -> Option<String> {
    String::from_utf8(bytes.to_vec()).ok()
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

fn decode_utf16le(bytes: &[u8]) -> Option<String> {
    decode_utf16(bytes, u16::from_le_bytes)
}

fn decode_utf16be(bytes: &[u8]) -> Option<String> {
    decode_utf16(bytes, u16::from_be_bytes)
}

fn decode_with_bom(bytes: &[u8]) -> Option<String> {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16le(rest),
        [0xFE, 0xFF, rest @ ..] => decode_utf16be(rest),
        [0xEF, 0xBB, 0xBF, rest @ ..] => decode_utf8(rest),
        _ => None,
    }
}
