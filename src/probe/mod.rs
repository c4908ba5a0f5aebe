//! Read-only questions about the host: which binaries exist, what they
//! report as their version.

#[cfg(test)]
mod tests;

use semver::Version;
use std::path::PathBuf;
use std::process::{Command, Stdio};

pub trait Probe {
    /// Absolute path of `binary` if it is on PATH.
    fn find(&self, binary: &str) -> Option<PathBuf>;

    /// Trimmed stdout of a successful `program args…`, or `None`.
    fn capture(&self, program: &str, args: &[&str]) -> Option<String>;

    /// Path of an installed macOS application bundle named `name`.
    fn app_bundle(&self, name: &str) -> Option<PathBuf>;

    fn has(&self, binary: &str) -> bool {
        self.find(binary).is_some()
    }

    fn is_root(&self) -> bool {
        self.capture("id", &["-u"]).as_deref() == Some("0")
    }

    /// Version reported by `zig version`, if zig is present and answers sanely.
    fn zig_version(&self) -> Option<Version> {
        self.capture("zig", &["version"])
            .and_then(|out| parse_version(&out))
    }
}

/// Parse a tool's version output. Accepts a bare `0.13.0` or
/// `0.14.0-dev.1951+857383689` as well as a two-component `0.13`.
pub fn parse_version(text: &str) -> Option<Version> {
    let token = text.split_whitespace().next()?;
    let token = token.strip_prefix('v').unwrap_or(token);
    Version::parse(token)
        .ok()
        .or_else(|| Version::parse(&format!("{token}.0")).ok())
}

/// Probes the real host.
#[derive(Debug, Default)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn find(&self, binary: &str) -> Option<PathBuf> {
        which::which(binary).ok()
    }

    fn capture(&self, program: &str, args: &[&str]) -> Option<String> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn app_bundle(&self, name: &str) -> Option<PathBuf> {
        let bundle = format!("{name}.app");
        let system = PathBuf::from("/Applications").join(&bundle);
        let user = dirs::home_dir().map(|h| h.join("Applications").join(&bundle));
        std::iter::once(system)
            .chain(user)
            .find(|p| p.exists())
    }
}
