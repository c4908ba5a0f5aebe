use std::fmt;

use super::Platform;
use crate::probe::Probe;
use crate::runner::Cmd;

/// OS package managers the installer can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Brew,
    Apt,
    Dnf,
    Pacman,
    Zypper,
}

impl PackageManager {
    const LINUX: [Self; 4] = [Self::Apt, Self::Dnf, Self::Pacman, Self::Zypper];

    /// First supported package manager on PATH for `platform`.
    pub fn detect(probe: &dyn Probe, platform: Platform) -> Option<Self> {
        if platform == Platform::Macos {
            return probe.has("brew").then_some(Self::Brew);
        }
        Self::LINUX.into_iter().find(|pm| probe.has(pm.binary()))
    }

    pub const fn binary(self) -> &'static str {
        match self {
            Self::Brew => "brew",
            Self::Apt => "apt-get",
            Self::Dnf => "dnf",
            Self::Pacman => "pacman",
            Self::Zypper => "zypper",
        }
    }

    /// Homebrew refuses to run as root; everything else needs it.
    pub const fn needs_root(self) -> bool {
        !matches!(self, Self::Brew)
    }

    pub fn install(self, packages: &[&str]) -> Cmd {
        let cmd = Cmd::new(self.binary());
        let cmd = match self {
            Self::Brew => cmd.arg("install"),
            Self::Apt | Self::Dnf => cmd.args(["install", "-y"]),
            Self::Pacman => cmd.args(["-S", "--needed", "--noconfirm"]),
            Self::Zypper => cmd.args(["--non-interactive", "install"]),
        };
        cmd.args(packages.iter().copied())
    }

    pub fn remove(self, packages: &[&str]) -> Cmd {
        let cmd = Cmd::new(self.binary());
        let cmd = match self {
            Self::Brew => cmd.arg("uninstall"),
            Self::Apt | Self::Dnf => cmd.args(["remove", "-y"]),
            Self::Pacman => cmd.args(["-R", "--noconfirm"]),
            Self::Zypper => cmd.args(["--non-interactive", "remove"]),
        };
        cmd.args(packages.iter().copied())
    }

    /// Refresh package metadata before installing.
    pub fn refresh(self) -> Option<Cmd> {
        match self {
            Self::Apt => Some(Cmd::new("apt-get").arg("update")),
            Self::Pacman => Some(Cmd::new("pacman").arg("-Sy")),
            Self::Brew => Some(Cmd::new("brew").arg("update")),
            Self::Dnf | Self::Zypper => None,
        }
    }

    /// Libraries and tools a Ghostty source build needs.
    pub const fn ghostty_build_deps(self) -> &'static [&'static str] {
        match self {
            Self::Apt => &[
                "libgtk-4-dev",
                "libadwaita-1-dev",
                "git",
                "blueprint-compiler",
                "gettext",
                "libxml2-utils",
                "curl",
                "xz-utils",
            ],
            Self::Dnf => &[
                "gtk4-devel",
                "libadwaita-devel",
                "git",
                "blueprint-compiler",
                "gettext",
                "curl",
                "xz",
            ],
            Self::Pacman => &[
                "gtk4",
                "libadwaita",
                "git",
                "blueprint-compiler",
                "gettext",
                "curl",
                "xz",
            ],
            Self::Zypper => &[
                "gtk4-tools",
                "libadwaita-devel",
                "git",
                "blueprint-compiler",
                "gettext",
                "curl",
                "xz",
            ],
            Self::Brew => &["git"],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Brew => "homebrew",
            Self::Apt => "apt",
            Self::Dnf => "dnf",
            Self::Pacman => "pacman",
            Self::Zypper => "zypper",
        })
    }
}
