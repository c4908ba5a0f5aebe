//! The install run: probe each component, install what is missing, and
//! record in the ledger which of them this run put there.

mod ghostty;
pub(crate) mod homebrew;
pub(crate) mod tools;
pub(crate) mod zig;


use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::component::Component;
use crate::config::Config;
use crate::ledger::{Ledger, LedgerKey};
use crate::platform::{PackageManager, Platform};
use crate::probe::Probe;
use crate::profile;
use crate::prompt::Prompt;
use crate::runner::{Cmd, Runner};

/// Drives one install run against a ledger the caller owns.
pub struct Installer<'a> {
    config: &'a Config,
    platform: Platform,
    home: PathBuf,
    shell: Option<String>,
    runner: &'a mut dyn Runner,
    probe: &'a dyn Probe,
    prompt: &'a mut dyn Prompt,
    elevate: bool,
    brew_installed: bool,
}

/// How a missing Ghostty gets installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Source,
    Homebrew,
    Snap,
}

impl<'a> Installer<'a> {
    pub fn new(
        config: &'a Config,
        platform: Platform,
        runner: &'a mut dyn Runner,
        probe: &'a dyn Probe,
        prompt: &'a mut dyn Prompt,
    ) -> Self {
        let elevate = !probe.is_root();
        Self {
            config,
            platform,
            home: dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")),
            shell: std::env::var("SHELL").ok(),
            runner,
            probe,
            prompt,
            elevate,
            brew_installed: false,
        }
    }

    /// Override the home directory and login shell used to pick the profile.
    #[must_use]
    pub fn with_home(mut self, home: &Path, shell: Option<&str>) -> Self {
        self.home = home.to_path_buf();
        self.shell = shell.map(ToString::to_string);
        self
    }

    /// Install every component, saving the ledger after each decision.
    pub fn run(&mut self, ledger: &mut Ledger) -> Result<()> {
        let profile_path = profile::detect(&self.home, self.shell.as_deref(), self.platform);
        if let Err(e) = ledger.set_path(LedgerKey::ShellProfile, Some(profile_path)) {
            warn!("Shell profile will not be edited: {e}");
        }
        self.record(ledger)?;

        for component in Component::INSTALL_ORDER {
            match component {
                Component::Homebrew if self.platform == Platform::Macos => {
                    self.ensure_homebrew(ledger)?;
                }
                Component::Homebrew => {}
                Component::Zig => self.ensure_zig(ledger)?,
                Component::Ghostty => self.ensure_ghostty(ledger)?,
                Component::Chafa => self.ensure_chafa(ledger)?,
                Component::Lazygit => self.ensure_lazygit(ledger)?,
            }
        }
        Ok(())
    }

    /// Persist the ledger, unless this is a dry run.
    fn record(&self, ledger: &Ledger) -> Result<()> {
        if self.runner.is_dry_run() {
            return Ok(());
        }
        ledger.save(&self.config.ledger_path())
    }

    fn mark(&self, ledger: &mut Ledger, component: Component, installed: bool) -> Result<()> {
        debug!("{}={installed}", component.flag_key());
        ledger.set_flag(component.flag_key(), installed);
        self.record(ledger)
    }

    fn mark_found(&self, ledger: &mut Ledger, component: Component) -> Result<()> {
        info!("{component} already present, leaving it alone");
        self.mark(ledger, component, false)
    }

    fn mark_installed(&self, ledger: &mut Ledger, component: Component) -> Result<()> {
        info!("Installed {component}");
        self.mark(ledger, component, true)
    }

    fn package_manager(&self) -> Result<PackageManager> {
        PackageManager::detect(self.probe, self.platform)
            .or_else(|| self.brew_installed.then_some(PackageManager::Brew))
            .with_context(|| format!("No supported package manager found on {}", self.platform))
    }

    fn pm_install(&mut self, pm: PackageManager, packages: &[&str]) -> Result<()> {
        let cmd = pm.install(packages).sudo_if(pm.needs_root() && self.elevate);
        self.runner.run(&cmd)
    }

    fn run_cmd(&mut self, cmd: &Cmd) -> Result<()> {
        self.runner.run(cmd)
    }

    /// Add `line` to the shell profile, logging instead of failing the run.
    fn add_to_profile(&self, ledger: &Ledger, line: &str) {
        let Some(path) = ledger.path(LedgerKey::ShellProfile) else {
            return;
        };
        if self.runner.is_dry_run() {
            info!("[dry-run] append to {}: {line}", path.display());
            return;
        }
        match profile::append_line(path, line) {
            Ok(true) => info!("Updated {}", path.display()),
            Ok(false) => {}
            Err(e) => warn!("Could not update shell profile: {e:#}"),
        }
    }

    fn create_dir(&self, dir: &Path) -> Result<()> {
        if self.runner.is_dry_run() {
            return Ok(());
        }
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))
    }
}
