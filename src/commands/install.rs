use anyhow::Result;
use chrono::Local;
use std::time::{Duration, Instant};
use tracing::info;

use ghostty_setup::{deploy, probe::SystemProbe, Config, Installer, Ledger, Platform};

use super::{prompt, runner};

pub fn cmd_install(dry_run: bool, skip_install: bool, yes: bool) -> Result<()> {
    let started = Instant::now();
    let platform = Platform::detect()?;
    let config = Config::load()?;
    deploy::check_assets(&config)?;
    info!("Detected platform: {platform}");
    if dry_run {
        info!("Dry run: no commands will be executed and no files written");
    }

    let mut runner = runner(dry_run);
    let mut prompt = prompt(yes);
    let probe = SystemProbe;
    let now = Local::now().naive_local();
    let ledger_path = config.ledger_path();

    if skip_install {
        info!("Skipping dependency installation");
        if Ledger::load(&ledger_path)?.is_none() && !dry_run {
            Ledger::new(platform, now).save(&ledger_path)?;
        }
    } else {
        let mut ledger = Ledger::new(platform, now);
        Installer::new(&config, platform, runner.as_mut(), &probe, prompt.as_mut())
            .run(&mut ledger)?;
    }

    let report = deploy::deploy(&config, now, dry_run)?;
    if !report.pruned.is_empty() {
        info!("Pruned {} old backup(s)", report.pruned.len());
    }

    let elapsed = Duration::from_secs(started.elapsed().as_secs());
    info!(
        "Setup finished in {}. Install record: {}",
        humantime::format_duration(elapsed),
        ledger_path.display()
    );
    Ok(())
}
