use anyhow::Result;
use tracing::warn;

use super::Installer;
use crate::component::Component;
use crate::ledger::{Ledger, LedgerKey};
use crate::platform::PackageManager;
use crate::runner::Cmd;

pub const LAZYGIT_PPA: &str = "ppa:lazygit-team/release";

impl Installer<'_> {
    pub(super) fn ensure_chafa(&mut self, ledger: &mut Ledger) -> Result<()> {
        self.ensure_package(ledger, Component::Chafa)
    }

    pub(super) fn ensure_lazygit(&mut self, ledger: &mut Ledger) -> Result<()> {
        if self.probe.has(Component::Lazygit.binary()) {
            return self.mark_found(ledger, Component::Lazygit);
        }
        let pm = self.package_manager()?;
        if pm == PackageManager::Apt && !self.apt_has_candidate("lazygit") {
            let added = self.run_cmd(
                &Cmd::new("add-apt-repository")
                    .args(["-y", LAZYGIT_PPA])
                    .sudo_if(self.elevate),
            );
            if let Err(e) = added {
                warn!("Could not add {LAZYGIT_PPA}, skipping lazygit: {e:#}");
                return self.mark(ledger, Component::Lazygit, false);
            }
            ledger.set_flag(LedgerKey::LazygitPpaAdded, true);
            self.record(ledger)?;
            if let Some(refresh) = pm.refresh() {
                if let Err(e) = self.run_cmd(&refresh.sudo_if(self.elevate)) {
                    warn!("Package index refresh after adding {LAZYGIT_PPA} failed: {e:#}");
                }
            }
        }
        self.ensure_package(ledger, Component::Lazygit)
    }

    /// Helper tools are optional: a failed install is logged and recorded
    /// as not installed, and the run carries on.
    fn ensure_package(&mut self, ledger: &mut Ledger, component: Component) -> Result<()> {
        if self.probe.has(component.binary()) {
            return self.mark_found(ledger, component);
        }
        let pm = self.package_manager()?;
        match self.pm_install(pm, &[component.binary()]) {
            Ok(()) => self.mark_installed(ledger, component),
            Err(e) => {
                warn!("Could not install {component} with {pm}: {e:#}");
                self.mark(ledger, component, false)
            }
        }
    }

    fn apt_has_candidate(&self, package: &str) -> bool {
        self.probe
            .capture("apt-cache", &["policy", package])
            .is_some_and(|out| {
                out.lines().any(|l| {
                    l.trim()
                        .strip_prefix("Candidate:")
                        .is_some_and(|c| !c.trim().is_empty() && c.trim() != "(none)")
                })
            })
    }
}
