use anyhow::Result;

use ghostty_setup::component::Component;
use ghostty_setup::{Config, Ledger};

pub fn cmd_status() -> Result<()> {
    let config = Config::load()?;
    let path = config.ledger_path();
    let Some(ledger) = Ledger::load(&path)? else {
        println!("No install record at {}", path.display());
        return Ok(());
    };

    println!("Install record: {}", path.display());
    print!("{}", ledger.render());
    println!();

    let ours: Vec<_> = Component::REMOVAL_ORDER
        .into_iter()
        .filter(|c| c.installed_by_script(&ledger))
        .map(Component::name)
        .collect();
    if ours.is_empty() {
        println!("Uninstall would remove no packages, only ghostty-setup's own files.");
    } else {
        println!("Uninstall would remove: {}", ours.join(", "));
    }
    Ok(())
}
