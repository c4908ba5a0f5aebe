mod package_manager;

#[cfg(test)]
mod tests;

pub use package_manager::PackageManager;

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

/// Host families the installer knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Macos,
    /// Linux running under the Windows Subsystem for Linux.
    Wsl,
}

impl Platform {
    /// Detect the current host. Anything other than Linux or macOS is fatal.
    pub fn detect() -> Result<Self> {
        let proc_version = std::fs::read_to_string("/proc/version").ok();
        Self::classify(
            std::env::consts::OS,
            std::env::var_os("WSL_DISTRO_NAME").is_some(),
            proc_version.as_deref(),
        )
    }

    fn classify(os: &str, wsl_env: bool, proc_version: Option<&str>) -> Result<Self> {
        match os {
            "macos" => Ok(Self::Macos),
            "linux" => {
                let microsoft_kernel = proc_version
                    .is_some_and(|v| v.to_ascii_lowercase().contains("microsoft"));
                if wsl_env || microsoft_kernel {
                    Ok(Self::Wsl)
                } else {
                    Ok(Self::Linux)
                }
            }
            other => bail!("Unsupported operating system: {other}"),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Macos => "macos",
            Self::Wsl => "wsl",
        }
    }

    /// Linux and WSL share package managers and the source build.
    pub const fn is_linux_like(self) -> bool {
        matches!(self, Self::Linux | Self::Wsl)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::Macos),
            "wsl" => Ok(Self::Wsl),
            _ => Err(()),
        }
    }
}
