//! Copies the bundled Ghostty configuration into place, backing up whatever
//! was there before.

mod backup;

#[cfg(test)]
mod tests;

pub use backup::{create_backup, prune_backups, BACKUP_PREFIX};

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::Config;

#[derive(Debug, Default)]
pub struct DeployReport {
    pub backup: Option<PathBuf>,
    pub pruned: Vec<PathBuf>,
    pub copied: usize,
}

/// Ghostty configuration compiled into the binary, deployed when
/// `paths.assets_dir` is unset.
const BUNDLED: &[(&str, &str)] = &[("config", include_str!("../../config/config"))];

/// Fail unless a configured `paths.assets_dir` exists. Run before any
/// install work so a bad path is reported up front.
pub fn check_assets(config: &Config) -> Result<()> {
    match &config.paths.assets_dir {
        Some(dir) if !dir.is_dir() => {
            bail!("Configuration files not found at {}", dir.display())
        }
        _ => Ok(()),
    }
}

pub fn deploy(config: &Config, now: NaiveDateTime, dry_run: bool) -> Result<DeployReport> {
    check_assets(config)?;
    let target = &config.paths.config_dir;
    let source = config
        .paths
        .assets_dir
        .as_ref()
        .map_or_else(|| "bundled configuration".to_string(), |d| d.display().to_string());

    if dry_run {
        info!("[dry-run] back up {} into {}", target.display(), config.paths.backup_dir.display());
        info!("[dry-run] copy {source} into {}", target.display());
        return Ok(DeployReport::default());
    }

    let backup = create_backup(target, &config.paths.backup_dir, now)?;
    if let Some(dir) = &backup {
        info!("Backed up existing configuration to {}", dir.display());
    }
    let pruned = prune_backups(&config.paths.backup_dir, config.backup.keep)?;

    let copied = match &config.paths.assets_dir {
        Some(assets) => copy_tree(assets, target, |_| false)?,
        None => write_bundled(target)?,
    };
    info!("Deployed {copied} configuration file(s) from {source} to {}", target.display());

    Ok(DeployReport { backup, pruned, copied })
}

fn write_bundled(dest: &Path) -> Result<usize> {
    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;
    for (name, content) in BUNDLED {
        let to = dest.join(name);
        std::fs::write(&to, content)
            .with_context(|| format!("Failed to write {}", to.display()))?;
        debug!("Wrote {}", to.display());
    }
    Ok(BUNDLED.len())
}

/// Recursively copy `src` into `dest`, skipping entries for which `skip`
/// returns true. Returns the number of files copied.
fn copy_tree(src: &Path, dest: &Path, skip: impl Fn(&Path) -> bool) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .context("walkdir yielded a path outside its root")?;
        if skip(rel) {
            continue;
        }
        let to = dest.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&to)
                .with_context(|| format!("Failed to create {}", to.display()))?;
            continue;
        }
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::copy(entry.path(), &to).with_context(|| {
            format!("Failed to copy {} to {}", entry.path().display(), to.display())
        })?;
        debug!("Copied {}", to.display());
        copied += 1;
    }
    Ok(copied)
}
