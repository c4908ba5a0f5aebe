use std::fmt;

use crate::ledger::{Ledger, LedgerKey};

/// A trackable unit the installer may put on the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Homebrew,
    Zig,
    Ghostty,
    Chafa,
    Lazygit,
}

impl Component {
    /// Dependencies come first when installing.
    pub const INSTALL_ORDER: [Self; 5] = [
        Self::Homebrew,
        Self::Zig,
        Self::Ghostty,
        Self::Chafa,
        Self::Lazygit,
    ];

    /// Dependents come first when removing; Homebrew is last since the
    /// others may have been installed through it.
    pub const REMOVAL_ORDER: [Self; 5] = [
        Self::Ghostty,
        Self::Lazygit,
        Self::Chafa,
        Self::Zig,
        Self::Homebrew,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Homebrew => "Homebrew",
            Self::Zig => "Zig",
            Self::Ghostty => "Ghostty",
            Self::Chafa => "chafa",
            Self::Lazygit => "lazygit",
        }
    }

    /// Executable whose presence on PATH means the component is installed.
    pub const fn binary(self) -> &'static str {
        match self {
            Self::Homebrew => "brew",
            Self::Zig => "zig",
            Self::Ghostty => "ghostty",
            Self::Chafa => "chafa",
            Self::Lazygit => "lazygit",
        }
    }

    pub const fn flag_key(self) -> LedgerKey {
        match self {
            Self::Homebrew => LedgerKey::HomebrewInstalledByScript,
            Self::Zig => LedgerKey::ZigInstalledByScript,
            Self::Ghostty => LedgerKey::GhosttyInstalledByScript,
            Self::Chafa => LedgerKey::ChafaInstalledByScript,
            Self::Lazygit => LedgerKey::LazygitInstalledByScript,
        }
    }

    pub fn installed_by_script(self, ledger: &Ledger) -> bool {
        ledger.flag(self.flag_key())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
