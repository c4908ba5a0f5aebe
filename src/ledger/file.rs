use anyhow::{Context, Result};
use chrono::Local;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use super::{Ledger, LedgerKey};
use crate::platform::Platform;

/// File name of the ledger inside the deployed configuration directory.
pub const LEDGER_FILE_NAME: &str = ".install_state";

impl Ledger {
    /// Read the ledger at `path`. Returns `Ok(None)` when no ledger exists.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ledger from {}", path.display()))?;
        let ledger = Self::parse(&content)
            .with_context(|| format!("Failed to parse ledger at {}", path.display()))?;
        Ok(Some(ledger))
    }

    /// Write the ledger to `path` through a temp file in the same directory,
    /// so an interrupted write leaves the previous ledger intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .with_context(|| format!("Ledger path {} has no parent", path.display()))?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create ledger dir {}", dir.display()))?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(self.render().as_bytes())
            .context("Failed to write ledger contents")?;
        tmp.as_file().sync_all().context("Failed to sync ledger")?;
        tmp.persist(path)
            .with_context(|| format!("Failed to replace ledger at {}", path.display()))?;
        debug!("Saved ledger to {}", path.display());
        Ok(())
    }
}

/// Key-at-a-time access to a ledger on disk. Every call is a full
/// load/modify/save cycle.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
    platform: Platform,
}

impl LedgerFile {
    /// `platform` is written when `set` has to initialize a missing ledger.
    pub const fn new(path: PathBuf, platform: Platform) -> Self {
        Self { path, platform }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value of `key`, or an empty string when the ledger or the key is absent.
    pub fn get(&self, key: LedgerKey) -> Result<String> {
        Ok(Ledger::load(&self.path)?
            .map(|ledger| ledger.get(key))
            .unwrap_or_default())
    }

    /// Upsert `key=value`, creating a default ledger first if none exists.
    pub fn set(&self, key: LedgerKey, value: &str) -> Result<()> {
        let mut ledger = Ledger::load(&self.path)?
            .unwrap_or_else(|| Ledger::new(self.platform, Local::now().naive_local()));
        ledger
            .set(key, value)
            .with_context(|| format!("Cannot record {key} in {}", self.path.display()))?;
        ledger.save(&self.path)
    }
}
