use anyhow::{bail, Result};
use chrono::Local;
use tracing::{info, warn};

use ghostty_setup::{probe::SystemProbe, Config, Ledger, Platform, Reconciler};

use super::{prompt, runner};

pub fn cmd_uninstall(dry_run: bool, yes: bool) -> Result<()> {
    let platform = Platform::detect()?;
    let config = Config::load()?;
    let ledger_path = config.ledger_path();

    let ledger = match Ledger::load(&ledger_path)? {
        Some(ledger) => ledger,
        None => {
            warn!(
                "No install record at {}; only ghostty-setup's own files will be removed",
                ledger_path.display()
            );
            Ledger::new(platform, Local::now().naive_local())
        }
    };

    let mut prompt = prompt(yes);
    let question = format!(
        "Remove what ghostty-setup installed and delete {}?",
        config.paths.config_dir.display()
    );
    if !prompt.confirm(&question)? {
        bail!("Uninstall cancelled");
    }

    let mut runner = runner(dry_run);
    let probe = SystemProbe;
    let report =
        Reconciler::new(&config, platform, runner.as_mut(), &probe, prompt.as_mut()).run(&ledger);

    println!("{report}");
    let failed = report.failures().count();
    if failed == 0 {
        info!("Uninstall complete");
    } else {
        warn!("Uninstall finished with {failed} failed step(s); see above");
    }
    Ok(())
}
