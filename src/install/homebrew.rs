use anyhow::{bail, Result};
use std::path::PathBuf;

use super::Installer;
use crate::component::Component;
use crate::ledger::Ledger;
use crate::profile;
use crate::runner::Cmd;

const INSTALL_SCRIPT: &str = "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";
const UNINSTALL_SCRIPT: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/uninstall.sh";

impl Installer<'_> {
    pub(super) fn ensure_homebrew(&mut self, ledger: &mut Ledger) -> Result<()> {
        if self.probe.has(Component::Homebrew.binary()) {
            return self.mark_found(ledger, Component::Homebrew);
        }
        if !self
            .prompt
            .confirm("Homebrew is required but not installed. Install it now?")?
        {
            bail!("Homebrew is required on macOS; aborting");
        }

        self.run_cmd(&install_script())?;
        self.brew_installed = true;
        if let Some(dir) = brew_path().parent() {
            self.runner.prepend_path(dir);
        }
        self.mark_installed(ledger, Component::Homebrew)?;
        self.add_to_profile(ledger, &profile::brew_shellenv(&brew_path()));
        Ok(())
    }
}

/// Where the official installer puts `brew` on this architecture.
pub fn brew_path() -> PathBuf {
    if std::env::consts::ARCH == "aarch64" {
        PathBuf::from("/opt/homebrew/bin/brew")
    } else {
        PathBuf::from("/usr/local/bin/brew")
    }
}

/// `/bin/bash -c "$(curl -fsSL url)"`, wrapped in an outer shell so the
/// substitution yields the script text rather than a command line.
fn script(url: &str) -> Cmd {
    Cmd::new("/bin/bash")
        .arg("-c")
        .arg(format!("/bin/bash -c \"$(curl -fsSL {url})\""))
}

pub fn install_script() -> Cmd {
    script(INSTALL_SCRIPT)
}

pub fn uninstall_script() -> Cmd {
    script(UNINSTALL_SCRIPT)
}
