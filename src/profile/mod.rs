//! Lines the installer appends to the user's shell startup file, and their
//! removal on uninstall.
//!
//! Removal is textual: any line matching a requested pattern goes, whether
//! this tool wrote it or the user did.

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::platform::Platform;

/// Comment placed above every appended line.
pub const MARKER: &str = "# Added by ghostty-setup";

const BREW_SHELLENV: &str = "brew shellenv";

/// Startup file for the user's login shell.
pub fn detect(home: &Path, shell: Option<&str>, platform: Platform) -> PathBuf {
    let shell_name = shell
        .and_then(|s| Path::new(s).file_name())
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    match shell_name {
        "zsh" => home.join(".zshrc"),
        "bash" if platform == Platform::Macos => home.join(".bash_profile"),
        _ => home.join(".bashrc"),
    }
}

pub fn path_export(bin_dir: &Path) -> String {
    format!("export PATH=\"{}:$PATH\"", bin_dir.display())
}

pub fn brew_shellenv(brew: &Path) -> String {
    format!("eval \"$({} {BREW_SHELLENV})\"", brew.display())
}

/// Append `line` under a marker unless the file already contains it.
/// Returns whether the file changed.
pub fn append_line(profile: &Path, line: &str) -> Result<bool> {
    let existing = match std::fs::read_to_string(profile) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", profile.display()))
        }
    };
    if existing.lines().any(|l| l.trim() == line) {
        return Ok(false);
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&format!("\n{MARKER}\n{line}\n"));

    if let Some(parent) = profile.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(profile, updated)
        .with_context(|| format!("Failed to write {}", profile.display()))?;
    Ok(true)
}

/// A line kind the installer may have appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Appended {
    BrewShellenv,
    PathExport(PathBuf),
}

impl Appended {
    fn matches(&self, line: &str) -> bool {
        match self {
            Self::BrewShellenv => line.contains(BREW_SHELLENV),
            Self::PathExport(bin_dir) => line == path_export(bin_dir),
        }
    }
}

/// Delete every line matching one of `kinds`, together with the marker and
/// blank separator written above it. Returns the number of lines removed.
pub fn remove_lines(profile: &Path, kinds: &[Appended]) -> Result<usize> {
    let content = std::fs::read_to_string(profile)
        .with_context(|| format!("Failed to read {}", profile.display()))?;
    let lines: Vec<&str> = content.lines().collect();
    let doomed = |line: &str| kinds.iter().any(|k| k.matches(line.trim()));

    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut removed = 0;
    for (i, line) in lines.iter().copied().enumerate() {
        if line.trim() == MARKER && lines.get(i + 1).copied().is_some_and(&doomed) {
            if kept.last().is_some_and(|l| l.trim().is_empty()) {
                kept.pop();
            }
            removed += 1;
        } else if doomed(line) {
            removed += 1;
        } else {
            kept.push(line);
        }
    }

    if removed > 0 {
        let mut updated = kept.join("\n");
        if !updated.is_empty() {
            updated.push('\n');
        }
        std::fs::write(profile, updated)
            .with_context(|| format!("Failed to write {}", profile.display()))?;
    }
    Ok(removed)
}
