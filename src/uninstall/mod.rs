//! Reconciles the machine against an install ledger: removes exactly what
//! the ledger says this tool installed, then deletes its own footprint.
//!
//! Every step is best-effort. A failed removal is recorded in the
//! [`UninstallReport`] and the remaining steps still run.

mod report;


pub use report::{Step, StepOutcome, UninstallReport};

use std::path::Path;
use tracing::{debug, info, warn};

use crate::component::Component;
use crate::config::Config;
use crate::install::homebrew;
use crate::install::tools::LAZYGIT_PPA;
use crate::install::zig::zig_link;
use crate::ledger::{InstallMethod, Ledger, LedgerKey};
use crate::platform::{PackageManager, Platform};
use crate::probe::Probe;
use crate::profile::{self, Appended};
use crate::prompt::Prompt;
use crate::runner::{Cmd, Runner};

const NOT_OURS: &str = "not installed by ghostty-setup";
const DRY_RUN: &str = "dry run";

pub struct Reconciler<'a> {
    config: &'a Config,
    platform: Platform,
    runner: &'a mut dyn Runner,
    probe: &'a dyn Probe,
    prompt: &'a mut dyn Prompt,
    elevate: bool,
}

impl<'a> Reconciler<'a> {
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
            runner,
            probe,
            prompt,
            elevate,
        }
    }

    pub fn run(&mut self, ledger: &Ledger) -> UninstallReport {
        let mut report = UninstallReport::default();

        for component in Component::REMOVAL_ORDER {
            let outcome = if component.installed_by_script(ledger) {
                self.remove(component, ledger)
            } else {
                StepOutcome::Skipped(NOT_OURS.to_string())
            };
            record(&mut report, component.name(), outcome);

            if component == Component::Lazygit {
                let outcome = if ledger.flag(LedgerKey::LazygitPpaAdded) {
                    self.command(
                        &Cmd::new("add-apt-repository")
                            .args(["--remove", "-y", LAZYGIT_PPA])
                            .sudo_if(self.elevate),
                    )
                } else {
                    StepOutcome::Skipped("not added by ghostty-setup".to_string())
                };
                record(&mut report, "lazygit PPA", outcome);
            }
        }

        let outcome = self.clean_profile(ledger, &report);
        record(&mut report, "shell profile", outcome);

        let ledger_path = self.config.ledger_path();
        let cleanup = [
            ("ledger", ledger_path.as_path()),
            ("configuration", self.config.paths.config_dir.as_path()),
            ("working copy", self.config.paths.clone_dir.as_path()),
        ];
        for (name, path) in cleanup {
            let outcome = self.delete(path);
            record(&mut report, name, outcome);
        }

        report
    }

    fn remove(&mut self, component: Component, ledger: &Ledger) -> StepOutcome {
        match component {
            Component::Ghostty => self.remove_ghostty(ledger),
            Component::Chafa | Component::Lazygit => {
                let Some(pm) = PackageManager::detect(self.probe, self.platform) else {
                    return StepOutcome::Failed("no supported package manager found".to_string());
                };
                self.command(
                    &pm.remove(&[component.binary()])
                        .sudo_if(pm.needs_root() && self.elevate),
                )
            }
            Component::Zig => {
                let link = self.delete(&zig_link(&self.config.paths.bin_dir));
                if let StepOutcome::Failed(_) = link {
                    return link;
                }
                self.delete(&self.config.paths.zig_dir)
            }
            Component::Homebrew => {
                let question = "Homebrew was installed by ghostty-setup. Removing it also \
                                removes every package installed with it. Remove Homebrew?";
                match self.prompt.confirm_destructive(question) {
                    Ok(true) => self.command(&homebrew::uninstall_script()),
                    Ok(false) => StepOutcome::Skipped("kept at user's request".to_string()),
                    Err(e) => StepOutcome::Failed(format!("could not read answer: {e}")),
                }
            }
        }
    }

    fn remove_ghostty(&mut self, ledger: &Ledger) -> StepOutcome {
        match ledger.ghostty_method() {
            InstallMethod::Source => match ledger.path(LedgerKey::GhosttyBinaryPath) {
                Some(binary) => self.delete(binary),
                None => StepOutcome::Failed("no binary path recorded".to_string()),
            },
            InstallMethod::Homebrew => {
                self.command(&Cmd::new("brew").args(["uninstall", "--cask", "ghostty"]))
            }
            InstallMethod::Snap => self.command(
                &Cmd::new("snap")
                    .args(["remove", "ghostty"])
                    .sudo_if(self.elevate),
            ),
            InstallMethod::PreExisting | InstallMethod::None => {
                StepOutcome::Skipped("no install method recorded".to_string())
            }
        }
    }

    /// Strip the lines the installer appended for components this run
    /// actually removed. A component that stays keeps its profile line.
    fn clean_profile(&self, ledger: &Ledger, report: &UninstallReport) -> StepOutcome {
        let Some(path) = ledger.path(LedgerKey::ShellProfile) else {
            return StepOutcome::Skipped("no shell profile recorded".to_string());
        };

        let mut kinds = Vec::new();
        if self.was_removed(report, Component::Homebrew) {
            kinds.push(Appended::BrewShellenv);
        }
        if self.was_removed(report, Component::Ghostty)
            && ledger.ghostty_method() == InstallMethod::Source
        {
            kinds.push(Appended::PathExport(self.config.paths.bin_dir.clone()));
        }

        if kinds.is_empty() {
            return StepOutcome::Skipped("nothing was added".to_string());
        }
        if !path.exists() {
            return StepOutcome::Skipped(format!("{} not found", path.display()));
        }
        if self.runner.is_dry_run() {
            return StepOutcome::Skipped(format!("{DRY_RUN}, would edit {}", path.display()));
        }
        match profile::remove_lines(path, &kinds) {
            Ok(0) => StepOutcome::Skipped(format!("nothing to remove in {}", path.display())),
            Ok(n) => StepOutcome::Succeeded(format!("{n} line(s) from {}", path.display())),
            Err(e) => StepOutcome::Failed(format!("{e:#}")),
        }
    }

    /// Whether the step for `component` removed it, or would have in a dry run.
    fn was_removed(&self, report: &UninstallReport, component: Component) -> bool {
        match report.outcome(component.name()) {
            Some(StepOutcome::Succeeded(_)) => true,
            Some(StepOutcome::Skipped(d)) => self.runner.is_dry_run() && d.starts_with(DRY_RUN),
            _ => false,
        }
    }

    fn command(&mut self, cmd: &Cmd) -> StepOutcome {
        match self.runner.run(cmd) {
            Ok(()) => StepOutcome::Succeeded(cmd.to_string()),
            Err(e) => StepOutcome::Failed(format!("{e:#}")),
        }
    }

    fn delete(&self, path: &Path) -> StepOutcome {
        let Ok(meta) = path.symlink_metadata() else {
            return StepOutcome::Skipped(format!("{} not found", path.display()));
        };
        if self.runner.is_dry_run() {
            return StepOutcome::Skipped(format!("{DRY_RUN}, would delete {}", path.display()));
        }
        let result = if meta.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        };
        match result {
            Ok(()) => StepOutcome::Succeeded(path.display().to_string()),
            Err(e) => StepOutcome::Failed(format!("{}: {e}", path.display())),
        }
    }
}

fn record(report: &mut UninstallReport, name: &str, outcome: StepOutcome) {
    match &outcome {
        StepOutcome::Succeeded(d) => info!("Removed {name}: {d}"),
        StepOutcome::Skipped(d) => debug!("Skipped {name}: {d}"),
        StepOutcome::Failed(d) => warn!("Could not remove {name}: {d}"),
    }
    report.push(name, outcome);
}
