use std::fmt;
use std::str::FromStr;

/// The fixed set of keys a ledger may contain, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerKey {
    Platform,
    GhosttyInstalledByScript,
    GhosttyInstallMethod,
    GhosttyBinaryPath,
    ChafaInstalledByScript,
    LazygitInstalledByScript,
    LazygitPpaAdded,
    HomebrewInstalledByScript,
    ZigInstalledByScript,
    ShellProfile,
    InstallDate,
}

/// Shape of the value stored under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueKind {
    Flag,
    Platform,
    Method,
    Path,
    Timestamp,
}

impl LedgerKey {
    pub const ALL: [Self; 11] = [
        Self::Platform,
        Self::GhosttyInstalledByScript,
        Self::GhosttyInstallMethod,
        Self::GhosttyBinaryPath,
        Self::ChafaInstalledByScript,
        Self::LazygitInstalledByScript,
        Self::LazygitPpaAdded,
        Self::HomebrewInstalledByScript,
        Self::ZigInstalledByScript,
        Self::ShellProfile,
        Self::InstallDate,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Platform => "PLATFORM",
            Self::GhosttyInstalledByScript => "GHOSTTY_INSTALLED_BY_SCRIPT",
            Self::GhosttyInstallMethod => "GHOSTTY_INSTALL_METHOD",
            Self::GhosttyBinaryPath => "GHOSTTY_BINARY_PATH",
            Self::ChafaInstalledByScript => "CHAFA_INSTALLED_BY_SCRIPT",
            Self::LazygitInstalledByScript => "LAZYGIT_INSTALLED_BY_SCRIPT",
            Self::LazygitPpaAdded => "LAZYGIT_PPA_ADDED",
            Self::HomebrewInstalledByScript => "HOMEBREW_INSTALLED_BY_SCRIPT",
            Self::ZigInstalledByScript => "ZIG_INSTALLED_BY_SCRIPT",
            Self::ShellProfile => "SHELL_PROFILE",
            Self::InstallDate => "INSTALL_DATE",
        }
    }

    pub(crate) const fn kind(self) -> ValueKind {
        match self {
            Self::Platform => ValueKind::Platform,
            Self::GhosttyInstallMethod => ValueKind::Method,
            Self::GhosttyBinaryPath | Self::ShellProfile => ValueKind::Path,
            Self::InstallDate => ValueKind::Timestamp,
            Self::GhosttyInstalledByScript
            | Self::ChafaInstalledByScript
            | Self::LazygitInstalledByScript
            | Self::LazygitPpaAdded
            | Self::HomebrewInstalledByScript
            | Self::ZigInstalledByScript => ValueKind::Flag,
        }
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|k| k.as_str() == s).ok_or(())
    }
}
