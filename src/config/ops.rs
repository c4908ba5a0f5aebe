use anyhow::{bail, Context, Result};
use semver::Version;
use std::path::{Path, PathBuf};
use url::Url;

use super::{Config, GhosttyMethod};

impl Config {
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;
        Ok(home.join(".config").join("ghostty-setup").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        config.validate()
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (key, dir) in self.path_entries() {
            if let Some(dir) = dir.filter(|d| !d.is_absolute()) {
                bail!("{key} must be an absolute path, got {}", dir.display());
            }
        }
        self.zig_version()?;
        self.zig_mirror()?;
        if self.ghostty.repo.trim().is_empty() {
            bail!("ghostty.repo must not be empty");
        }
        if self.backup.keep == 0 {
            bail!("backup.keep must be at least 1");
        }
        Ok(())
    }

    fn path_entries(&self) -> [(&'static str, Option<&Path>); 6] {
        let p = &self.paths;
        [
            ("paths.config_dir", Some(p.config_dir.as_path())),
            ("paths.backup_dir", Some(p.backup_dir.as_path())),
            ("paths.clone_dir", Some(p.clone_dir.as_path())),
            ("paths.bin_dir", Some(p.bin_dir.as_path())),
            ("paths.zig_dir", Some(p.zig_dir.as_path())),
            ("paths.assets_dir", p.assets_dir.as_deref()),
        ]
    }

    pub fn zig_version(&self) -> Result<Version> {
        Version::parse(&self.zig.version)
            .with_context(|| format!("Invalid zig.version: {}", self.zig.version))
    }

    /// Download base for zig tarballs, always with a trailing slash so
    /// `join` appends rather than replaces the last segment.
    pub fn zig_mirror(&self) -> Result<Url> {
        let base = if self.zig.mirror.ends_with('/') {
            self.zig.mirror.clone()
        } else {
            format!("{}/", self.zig.mirror)
        };
        Url::parse(&base).with_context(|| format!("Invalid zig.mirror: {}", self.zig.mirror))
    }

    /// Get a config value by dot-separated key path
    pub fn get_value(&self, key: &str) -> Result<String> {
        let path = |p: &Path| p.display().to_string();
        match key {
            "paths.config_dir" => Ok(path(&self.paths.config_dir)),
            "paths.backup_dir" => Ok(path(&self.paths.backup_dir)),
            "paths.clone_dir" => Ok(path(&self.paths.clone_dir)),
            "paths.bin_dir" => Ok(path(&self.paths.bin_dir)),
            "paths.zig_dir" => Ok(path(&self.paths.zig_dir)),
            "paths.assets_dir" => Ok(self.paths.assets_dir.as_deref().map(path).unwrap_or_default()),
            "ghostty.repo" => Ok(self.ghostty.repo.clone()),
            "ghostty.method" => Ok(method_name(self.ghostty.method).to_string()),
            "zig.version" => Ok(self.zig.version.clone()),
            "zig.mirror" => Ok(self.zig.mirror.clone()),
            "backup.keep" => Ok(self.backup.keep.to_string()),
            _ => bail!("Unknown config key: {key}"),
        }
    }

    /// Set a config value by dot-separated key path
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "paths.config_dir" => self.paths.config_dir = PathBuf::from(value),
            "paths.backup_dir" => self.paths.backup_dir = PathBuf::from(value),
            "paths.clone_dir" => self.paths.clone_dir = PathBuf::from(value),
            "paths.bin_dir" => self.paths.bin_dir = PathBuf::from(value),
            "paths.zig_dir" => self.paths.zig_dir = PathBuf::from(value),
            "paths.assets_dir" => {
                self.paths.assets_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "ghostty.repo" => self.ghostty.repo = value.to_string(),
            "ghostty.method" => {
                self.ghostty.method = match value {
                    "auto" => GhosttyMethod::Auto,
                    "source" => GhosttyMethod::Source,
                    "snap" => GhosttyMethod::Snap,
                    "homebrew" => GhosttyMethod::Homebrew,
                    _ => bail!("Invalid ghostty.method: {value} (auto, source, snap or homebrew)"),
                };
            }
            "zig.version" => self.zig.version = value.to_string(),
            "zig.mirror" => self.zig.mirror = value.to_string(),
            "backup.keep" => {
                self.backup.keep = value.parse::<usize>()
                    .with_context(|| format!("Invalid number: {value}"))?;
            }
            _ => bail!("Unknown config key: {key}"),
        }
        self.validate()
    }
}

const fn method_name(method: GhosttyMethod) -> &'static str {
    match method {
        GhosttyMethod::Auto => "auto",
        GhosttyMethod::Source => "source",
        GhosttyMethod::Snap => "snap",
        GhosttyMethod::Homebrew => "homebrew",
    }
}
