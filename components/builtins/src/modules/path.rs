//! The `path` capability: POSIX-style path string manipulation.

use super::NativeModule;
use rquickjs::function::{Func, Opt, Rest};
use rquickjs::{Ctx, Object};

const SEP: char = '/';

/// `require("path")`
#[derive(Debug, Clone, Copy, Default)]
pub struct PathModule;

impl NativeModule for PathModule {
    fn name(&self) -> &'static str {
        "path"
    }

    fn exports<'js>(&self, ctx: &Ctx<'js>) -> rquickjs::Result<Object<'js>> {
        let exports = Object::new(ctx.clone())?;
        exports.set("sep", SEP.to_string())?;
        exports.set("join", Func::from(|parts: Rest<String>| join(&parts.0)))?;
        exports.set(
            "basename",
            Func::from(|path: String, ext: Opt<String>| basename(&path, ext.0.as_deref())),
        )?;
        exports.set("dirname", Func::from(|path: String| dirname(&path)))?;
        exports.set("extname", Func::from(|path: String| extname(&path)))?;
        exports.set("isAbsolute", Func::from(|path: String| path.starts_with(SEP)))?;
        exports.set("normalize", Func::from(|path: String| normalize(&path)))?;
        Ok(exports)
    }
}

/// Joins segments with `/` and normalizes the result.
pub fn join(parts: &[String]) -> String {
    let joined = parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        ".".to_string()
    } else {
        normalize(&joined)
    }
}

/// Resolves `.` and `..` segments and collapses repeated separators.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let absolute = path.starts_with(SEP);
    let trailing = path.ends_with(SEP);

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(SEP) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut normalized = segments.join("/");
    if absolute {
        normalized.insert(0, SEP);
    }
    if normalized.is_empty() {
        return ".".to_string();
    }
    if trailing && !normalized.ends_with(SEP) {
        normalized.push(SEP);
    }
    normalized
}

/// Last path segment, optionally without `ext`.
pub fn basename(path: &str, ext: Option<&str>) -> String {
    let trimmed = path.trim_end_matches(SEP);
    let base = trimmed.rsplit(SEP).next().unwrap_or("");
    match ext {
        Some(ext) if !ext.is_empty() && base != ext && base.ends_with(ext) => {
            base[..base.len() - ext.len()].to_string()
        }
        _ => base.to_string(),
    }
}

/// Everything before the last path segment.
pub fn dirname(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches(SEP);
    if trimmed.is_empty() {
        return SEP.to_string();
    }
    match trimmed.rfind(SEP) {
        Some(0) => SEP.to_string(),
        Some(index) => trimmed[..index].trim_end_matches(SEP).to_string(),
        None => ".".to_string(),
    }
}

/// Extension of the last segment, including the dot.
///
/// Leading dots (hidden files) do not start an extension.
pub fn extname(path: &str) -> String {
    let base = basename(path, None);
    match base.rfind('.') {
        Some(0) | None => String::new(),
        Some(index) => base[index..].to_string(),
    }
}
