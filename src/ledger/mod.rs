//! The install ledger: a line-oriented `KEY=value` record of what this tool
//! installed and what it found already present.
//!
//! A [`Ledger`] is an in-memory document. It is read with [`Ledger::load`],
//! mutated through typed setters as install decisions are made, and written
//! back with [`Ledger::save`]. Comment lines, blank lines and keys this
//! version does not know are carried through untouched.

mod error;
mod file;
mod key;
mod value;


pub use error::LedgerError;
pub use file::{LedgerFile, LEDGER_FILE_NAME};
pub use key::LedgerKey;
pub use value::{InstallMethod, TIMESTAMP_FORMAT};

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::platform::Platform;
use key::ValueKind;
use value::Value;

const HEADER: &str = "# ghostty-setup install state. Edit with care.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Blank line, comment, or a key unknown to this version.
    Raw(String),
    Entry(LedgerKey, Value),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    lines: Vec<Line>,
}

impl Ledger {
    /// A ledger with every key at its default and `INSTALL_DATE` set to `now`.
    pub fn new(platform: Platform, now: NaiveDateTime) -> Self {
        let mut lines = vec![Line::Raw(HEADER.to_string())];
        lines.extend(
            LedgerKey::ALL
                .into_iter()
                .map(|key| Line::Entry(key, Value::default_for(key, platform))),
        );
        let mut ledger = Self { lines };
        ledger.upsert(LedgerKey::InstallDate, Value::Timestamp(Some(now)));
        ledger
    }

    pub fn parse(text: &str) -> Result<Self, LedgerError> {
        let mut lines = Vec::new();
        let mut seen = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                lines.push(Line::Raw(raw.to_string()));
                continue;
            }
            let Some((name, val)) = trimmed.split_once('=') else {
                return Err(LedgerError::Malformed {
                    line,
                    content: raw.to_string(),
                });
            };
            let Ok(key) = name.trim().parse::<LedgerKey>() else {
                warn!("Ignoring unknown ledger key {:?} on line {line}", name.trim());
                lines.push(Line::Raw(raw.to_string()));
                continue;
            };
            if seen.contains(&key) {
                return Err(LedgerError::DuplicateKey { line, key });
            }
            seen.push(key);
            let value = Value::parse(key, val.trim()).map_err(|e| LedgerError::AtLine {
                line,
                error: Box::new(e),
            })?;
            lines.push(Line::Entry(key, value));
        }

        Ok(Self { lines })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Raw(s) => out.push_str(s),
                Line::Entry(key, value) => out.push_str(&format!("{key}={value}")),
            }
            out.push('\n');
        }
        out
    }

    /// The textual value stored under `key`, or an empty string when absent.
    pub fn get(&self, key: LedgerKey) -> String {
        self.value(key).map(ToString::to_string).unwrap_or_default()
    }

    /// Parse `raw` according to `key` and store it, replacing any prior value.
    pub fn set(&mut self, key: LedgerKey, raw: &str) -> Result<(), LedgerError> {
        let value = Value::parse(key, raw)?;
        self.upsert(key, value);
        Ok(())
    }

    pub fn platform(&self) -> Option<Platform> {
        match self.value(LedgerKey::Platform) {
            Some(Value::Platform(p)) => Some(*p),
            _ => None,
        }
    }

    /// A boolean key. Absent keys read as `false`.
    pub fn flag(&self, key: LedgerKey) -> bool {
        matches!(self.value(key), Some(Value::Flag(true)))
    }

    pub fn set_flag(&mut self, key: LedgerKey, on: bool) {
        debug_assert_eq!(key.kind(), ValueKind::Flag, "{key} is not a flag");
        self.upsert(key, Value::Flag(on));
    }

    pub fn ghostty_method(&self) -> InstallMethod {
        match self.value(LedgerKey::GhosttyInstallMethod) {
            Some(Value::Method(m)) => *m,
            _ => InstallMethod::None,
        }
    }

    pub fn set_ghostty_method(&mut self, method: InstallMethod) {
        self.upsert(LedgerKey::GhosttyInstallMethod, Value::Method(method));
    }

    pub fn path(&self, key: LedgerKey) -> Option<&Path> {
        match self.value(key) {
            Some(Value::Path(Some(p))) => Some(p.as_path()),
            _ => None,
        }
    }

    /// Store a path value. Relative paths are rejected, as they would be on load.
    pub fn set_path(&mut self, key: LedgerKey, path: Option<PathBuf>) -> Result<(), LedgerError> {
        debug_assert_eq!(key.kind(), ValueKind::Path, "{key} is not a path");
        if let Some(p) = path.as_deref().filter(|p| !p.is_absolute()) {
            return Err(LedgerError::InvalidValue {
                key,
                value: p.display().to_string(),
                expected: value::ABSOLUTE_PATH,
            });
        }
        self.upsert(key, Value::Path(path));
        Ok(())
    }

    pub fn install_date(&self) -> Option<NaiveDateTime> {
        match self.value(LedgerKey::InstallDate) {
            Some(Value::Timestamp(t)) => *t,
            _ => None,
        }
    }

    fn value(&self, key: LedgerKey) -> Option<&Value> {
        self.lines.iter().find_map(|line| match line {
            Line::Entry(k, v) if *k == key => Some(v),
            _ => None,
        })
    }

    fn upsert(&mut self, key: LedgerKey, value: Value) {
        for line in &mut self.lines {
            if let Line::Entry(k, v) = line {
                if *k == key {
                    *v = value;
                    return;
                }
            }
        }
        self.lines.push(Line::Entry(key, value));
    }
}
