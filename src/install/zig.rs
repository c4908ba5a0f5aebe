use anyhow::{Context, Result};
use semver::Version;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{Installer, Route};
use crate::component::Component;
use crate::ledger::{Ledger, LedgerKey};
use crate::runner::Cmd;

impl Installer<'_> {
    /// Zig is only needed to build Ghostty from source.
    pub(super) fn ensure_zig(&mut self, ledger: &mut Ledger) -> Result<()> {
        if self.find_ghostty().is_some() || self.ghostty_route()? != Route::Source {
            return Ok(());
        }

        let required = self.config.zig_version()?;
        match self.probe.zig_version() {
            Some(found) if found >= required => {
                return self.mark_found(ledger, Component::Zig);
            }
            Some(found) => info!("zig {found} is older than {required}; installing {required}"),
            None => info!("zig not found; installing {required}"),
        }

        self.install_zig(&required)?;
        self.mark_installed(ledger, Component::Zig)
    }

    fn install_zig(&mut self, version: &Version) -> Result<()> {
        let name = tarball_name(std::env::consts::ARCH, version);
        let url = self
            .config
            .zig_mirror()?
            .join(&format!("{version}/{name}"))
            .context("Failed to build zig download URL")?;
        let zig_dir = self.config.paths.zig_dir.clone();
        let tarball = zig_dir.join(&name);

        self.create_dir(&zig_dir)?;
        self.run_cmd(
            &Cmd::new("curl")
                .args(["-fsSL", "-o"])
                .path_arg(&tarball)
                .arg(url.as_str()),
        )?;
        self.run_cmd(
            &Cmd::new("tar")
                .arg("-xJf")
                .path_arg(&tarball)
                .arg("-C")
                .path_arg(&zig_dir)
                .arg("--strip-components=1"),
        )?;
        if !self.runner.is_dry_run() {
            if let Err(e) = std::fs::remove_file(&tarball) {
                debug!("Left {} in place: {e}", tarball.display());
            }
        }
        self.link_zig(&zig_dir.join("zig"))
    }

    fn link_zig(&self, target: &Path) -> Result<()> {
        let link = zig_link(&self.config.paths.bin_dir);
        if self.runner.is_dry_run() {
            info!("[dry-run] link {} -> {}", link.display(), target.display());
            return Ok(());
        }
        self.create_dir(&self.config.paths.bin_dir)?;
        if link.symlink_metadata().is_ok() {
            std::fs::remove_file(&link)
                .with_context(|| format!("Failed to replace {}", link.display()))?;
        }
        #[cfg(unix)]
        std::os::unix::fs::symlink(target, &link)
            .with_context(|| format!("Failed to link {}", link.display()))?;
        #[cfg(not(unix))]
        std::fs::copy(target, &link)
            .with_context(|| format!("Failed to copy zig to {}", link.display()))?;
        debug!("Linked {} -> {}", link.display(), target.display());
        Ok(())
    }

    /// The zig to build with: ours when this run installed it, else PATH's.
    pub(super) fn zig_program(&self, ledger: &Ledger) -> String {
        if ledger.flag(LedgerKey::ZigInstalledByScript) {
            zig_link(&self.config.paths.bin_dir).display().to_string()
        } else {
            "zig".to_string()
        }
    }
}

pub fn zig_link(bin_dir: &Path) -> PathBuf {
    bin_dir.join("zig")
}

/// Release tarball name on ziglang.org for a Linux host.
pub fn tarball_name(arch: &str, version: &Version) -> String {
    format!("zig-linux-{arch}-{version}.tar.xz")
}
