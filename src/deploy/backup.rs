use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::copy_tree;
use crate::ledger::{LEDGER_FILE_NAME, TIMESTAMP_FORMAT};

/// Backup directories are named `backup_<YYYYMMDD_HHMMSS>[-N]`; ordering
/// by timestamp and then `N` is creation order.
pub const BACKUP_PREFIX: &str = "backup_";

/// Copy `config_dir` into a fresh timestamped directory under `backup_dir`.
/// Nothing is backed up when `config_dir` holds no files besides the ledger.
pub fn create_backup(
    config_dir: &Path,
    backup_dir: &Path,
    now: NaiveDateTime,
) -> Result<Option<PathBuf>> {
    if !has_user_files(config_dir)? {
        return Ok(None);
    }

    let stamp = format!("{BACKUP_PREFIX}{}", now.format(TIMESTAMP_FORMAT));
    let mut dest = backup_dir.join(&stamp);
    let mut n = 1;
    while dest.exists() {
        dest = backup_dir.join(format!("{stamp}-{n}"));
        n += 1;
    }
    std::fs::create_dir_all(&dest)
        .with_context(|| format!("Failed to create backup dir {}", dest.display()))?;

    copy_tree(config_dir, &dest, |rel| rel == Path::new(LEDGER_FILE_NAME))?;
    Ok(Some(dest))
}

/// Delete all but the `keep` newest backups. Returns what was deleted.
pub fn prune_backups(backup_dir: &Path, keep: usize) -> Result<Vec<PathBuf>> {
    if !backup_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut backups: Vec<PathBuf> = std::fs::read_dir(backup_dir)
        .with_context(|| format!("Failed to list {}", backup_dir.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
        .filter(|e| e.file_name().to_string_lossy().starts_with(BACKUP_PREFIX))
        .map(|e| e.path())
        .collect();
    backups.sort_by_cached_key(|p| backup_order(p));

    let excess = backups.len().saturating_sub(keep);
    let doomed: Vec<PathBuf> = backups.into_iter().take(excess).collect();
    for dir in &doomed {
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to remove old backup {}", dir.display()))?;
        debug!("Pruned backup {}", dir.display());
    }
    Ok(doomed)
}

/// Sort key of a backup directory: its timestamp, then the collision
/// suffix as a number, so `-10` follows `-9`.
fn backup_order(path: &Path) -> (String, u32) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('-') {
        Some((stamp, n)) => (stamp.to_string(), n.parse().unwrap_or(0)),
        None => (name, 0),
    }
}

fn has_user_files(dir: &Path) -> Result<bool> {
    if !dir.is_dir() {
        return Ok(false);
    }
    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?;
    Ok(entries.any(|e| e.is_ok_and(|e| e.file_name() != LEDGER_FILE_NAME)))
}
