use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{Installer, Route};
use crate::component::Component;
use crate::config::GhosttyMethod;
use crate::ledger::{InstallMethod, Ledger, LedgerKey};
use crate::platform::Platform;
use crate::profile;
use crate::runner::Cmd;

impl Installer<'_> {
    pub(super) fn ensure_ghostty(&mut self, ledger: &mut Ledger) -> Result<()> {
        if let Some(found) = self.find_ghostty() {
            ledger.set_ghostty_method(InstallMethod::PreExisting);
            if let Err(e) = ledger.set_path(LedgerKey::GhosttyBinaryPath, Some(found)) {
                warn!("Not recording the existing Ghostty location: {e}");
            }
            return self.mark_found(ledger, Component::Ghostty);
        }

        let route = self.ghostty_route()?;
        let binary = match route {
            Route::Source => self.build_ghostty(ledger)?,
            Route::Homebrew => {
                if !self.brew_installed && !self.probe.has("brew") {
                    bail!("ghostty.method is homebrew but brew is not installed");
                }
                self.run_cmd(&Cmd::new("brew").args(["install", "--cask", "ghostty"]))?;
                PathBuf::from("/Applications/Ghostty.app")
            }
            Route::Snap => {
                if !self.probe.has("snap") {
                    bail!("ghostty.method is snap but snap is not installed");
                }
                self.run_cmd(
                    &Cmd::new("snap")
                        .args(["install", "ghostty", "--classic"])
                        .sudo_if(self.elevate),
                )?;
                PathBuf::from("/snap/bin/ghostty")
            }
        };

        ledger.set_ghostty_method(route.method());
        ledger.set_path(LedgerKey::GhosttyBinaryPath, Some(binary))?;
        self.mark_installed(ledger, Component::Ghostty)
    }

    pub(super) fn find_ghostty(&self) -> Option<PathBuf> {
        self.probe.find(Component::Ghostty.binary()).or_else(|| {
            (self.platform == Platform::Macos)
                .then(|| self.probe.app_bundle("Ghostty"))
                .flatten()
        })
    }

    pub(super) fn ghostty_route(&self) -> Result<Route> {
        let linux = self.platform.is_linux_like();
        match self.config.ghostty.method {
            GhosttyMethod::Homebrew => Ok(Route::Homebrew),
            GhosttyMethod::Auto if linux => Ok(Route::Source),
            GhosttyMethod::Auto => Ok(Route::Homebrew),
            GhosttyMethod::Source if linux => Ok(Route::Source),
            GhosttyMethod::Snap if linux => Ok(Route::Snap),
            GhosttyMethod::Source | GhosttyMethod::Snap => {
                bail!("ghostty.method {:?} is only supported on Linux", self.config.ghostty.method)
            }
        }
    }

    /// Install build dependencies, fetch the sources, build, and copy the
    /// binary into the bin dir. Returns the installed binary's path.
    fn build_ghostty(&mut self, ledger: &Ledger) -> Result<PathBuf> {
        let pm = self.package_manager()?;
        if let Some(refresh) = pm.refresh() {
            self.run_cmd(&refresh.sudo_if(pm.needs_root() && self.elevate))?;
        }
        self.pm_install(pm, pm.ghostty_build_deps())?;

        let clone = self.config.paths.clone_dir.clone();
        if clone.join(".git").exists() {
            info!("Updating Ghostty sources in {}", clone.display());
            self.run_cmd(&Cmd::new("git").arg("-C").path_arg(&clone).args(["pull", "--ff-only"]))?;
        } else {
            info!("Cloning {} into {}", self.config.ghostty.repo, clone.display());
            if let Some(parent) = clone.parent() {
                self.create_dir(parent)?;
            }
            self.run_cmd(
                &Cmd::new("git")
                    .args(["clone", "--depth", "1"])
                    .arg(self.config.ghostty.repo.as_str())
                    .path_arg(&clone),
            )?;
        }

        let zig = self.zig_program(ledger);
        self.run_cmd(
            &Cmd::new(zig)
                .args(["build", "-Doptimize=ReleaseFast"])
                .current_dir(&clone),
        )?;

        let bin_dir = self.config.paths.bin_dir.clone();
        let dest = bin_dir.join(Component::Ghostty.binary());
        self.copy_binary(&clone.join("zig-out").join("bin").join("ghostty"), &dest)?;
        self.add_to_profile(ledger, &profile::path_export(&bin_dir));
        Ok(dest)
    }

    fn copy_binary(&self, from: &Path, to: &Path) -> Result<()> {
        if self.runner.is_dry_run() {
            info!("[dry-run] copy {} to {}", from.display(), to.display());
            return Ok(());
        }
        if let Some(parent) = to.parent() {
            self.create_dir(parent)?;
        }
        std::fs::copy(from, to)
            .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(to, std::fs::Permissions::from_mode(0o755))?;
        }
        Ok(())
    }
}

impl Route {
    pub(super) const fn method(self) -> InstallMethod {
        match self {
            Self::Source => InstallMethod::Source,
            Self::Homebrew => InstallMethod::Homebrew,
            Self::Snap => InstallMethod::Snap,
        }
    }
}
