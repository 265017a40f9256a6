//! The `os` capability: facts about the host platform.

use super::NativeModule;
use rquickjs::function::Func;
use rquickjs::{Ctx, Object};
use std::env;

/// `require("os")`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsModule;

impl NativeModule for OsModule {
    fn name(&self) -> &'static str {
        "os"
    }

    fn exports<'js>(&self, ctx: &Ctx<'js>) -> rquickjs::Result<Object<'js>> {
        let exports = Object::new(ctx.clone())?;
        exports.set("EOL", eol())?;
        exports.set("platform", Func::from(platform))?;
        exports.set("arch", Func::from(arch))?;
        exports.set("homedir", Func::from(homedir))?;
        exports.set("tmpdir", Func::from(tmpdir))?;
        Ok(exports)
    }
}

/// Line terminator of the host platform.
pub fn eol() -> &'static str {
    if cfg!(windows) {
        "\r\n"
    } else {
        "\n"
    }
}

/// Platform name in the form scripts expect (`linux`, `darwin`, `win32`, ...).
pub fn platform() -> &'static str {
    match env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}

/// CPU architecture in the form scripts expect (`x64`, `arm64`, ...).
pub fn arch() -> &'static str {
    match env::consts::ARCH {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        other => other,
    }
}

fn homedir() -> String {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .unwrap_or_default()
}

fn tmpdir() -> String {
    env::temp_dir().to_string_lossy().into_owned()
}
