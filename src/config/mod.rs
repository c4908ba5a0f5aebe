mod ops;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ledger::LEDGER_FILE_NAME;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub ghostty: GhosttyConfig,
    pub zig: ZigConfig,
    pub backup: BackupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where the Ghostty configuration is deployed (and the ledger lives)
    pub config_dir: PathBuf,
    pub backup_dir: PathBuf,
    /// Working copy of the Ghostty repository for source builds
    pub clone_dir: PathBuf,
    pub bin_dir: PathBuf,
    pub zig_dir: PathBuf,
    /// Configuration files to deploy into `config_dir`. Unset deploys the
    /// configuration bundled with this binary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GhosttyMethod {
    /// Homebrew cask on macOS, source build elsewhere
    #[default]
    Auto,
    Source,
    Snap,
    Homebrew,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GhosttyConfig {
    pub repo: String,
    pub method: GhosttyMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZigConfig {
    /// Minimum acceptable zig, and the version downloaded when missing
    pub version: String,
    pub mirror: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    pub keep: usize,
}

impl PathsConfig {
    /// Default layout relative to a home directory.
    pub fn under(home: &Path) -> Self {
        let data = home.join(".local").join("share").join("ghostty-setup");
        Self {
            config_dir: home.join(".config").join("ghostty"),
            backup_dir: home.join(".config").join("ghostty-backups"),
            clone_dir: data.join("ghostty"),
            bin_dir: home.join(".local").join("bin"),
            zig_dir: data.join("zig"),
            assets_dir: None,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
        Self::under(&home)
    }
}

impl Default for GhosttyConfig {
    fn default() -> Self {
        Self {
            repo: "https://github.com/ghostty-org/ghostty.git".to_string(),
            method: GhosttyMethod::Auto,
        }
    }
}

impl Default for ZigConfig {
    fn default() -> Self {
        Self {
            version: "0.13.0".to_string(),
            mirror: "https://ziglang.org/download/".to_string(),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self { keep: 5 }
    }
}

impl Config {
    pub fn ledger_path(&self) -> PathBuf {
        self.paths.config_dir.join(LEDGER_FILE_NAME)
    }
}
