pub mod component;
pub mod config;
pub mod deploy;
pub mod install;
pub mod ledger;
pub mod platform;
pub mod probe;
pub mod profile;
pub mod prompt;
pub mod runner;
pub mod uninstall;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use install::Installer;
pub use ledger::{Ledger, LedgerFile, LedgerKey};
pub use platform::Platform;
pub use uninstall::{Reconciler, UninstallReport};
