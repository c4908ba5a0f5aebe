pub mod config;
pub mod install;
pub mod status;
pub mod uninstall;

use ghostty_setup::prompt::{AssumeYes, Prompt, StdinPrompt};
use ghostty_setup::runner::{DryRun, Runner, SystemRunner};

pub fn runner(dry_run: bool) -> Box<dyn Runner> {
    if dry_run {
        Box::new(DryRun)
    } else {
        Box::new(SystemRunner)
    }
}

pub fn prompt(yes: bool) -> Box<dyn Prompt> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinPrompt)
    }
}
