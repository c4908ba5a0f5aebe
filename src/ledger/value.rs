use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::key::{LedgerKey, ValueKind};
use super::LedgerError;
use crate::platform::Platform;

/// `INSTALL_DATE` and backup directory timestamp layout.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub(crate) const ABSOLUTE_PATH: &str = "an absolute path";

/// How Ghostty ended up on the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallMethod {
    Source,
    Homebrew,
    Snap,
    PreExisting,
    #[default]
    None,
}

impl InstallMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Homebrew => "homebrew",
            Self::Snap => "snap",
            Self::PreExisting => "pre-existing",
            Self::None => "none",
        }
    }
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(Self::Source),
            "homebrew" => Ok(Self::Homebrew),
            "snap" => Ok(Self::Snap),
            "pre-existing" => Ok(Self::PreExisting),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

/// A parsed ledger value. Which variant a key holds is fixed by the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Value {
    Flag(bool),
    Platform(Platform),
    Method(InstallMethod),
    Path(Option<PathBuf>),
    Timestamp(Option<NaiveDateTime>),
}

impl Value {
    pub(crate) fn parse(key: LedgerKey, raw: &str) -> Result<Self, LedgerError> {
        let invalid = |expected: &'static str| LedgerError::InvalidValue {
            key,
            value: raw.to_string(),
            expected,
        };
        match key.kind() {
            ValueKind::Flag => match raw {
                "true" => Ok(Self::Flag(true)),
                "false" => Ok(Self::Flag(false)),
                _ => Err(invalid("true or false")),
            },
            ValueKind::Platform => raw
                .parse()
                .map(Self::Platform)
                .map_err(|()| invalid("linux, macos or wsl")),
            ValueKind::Method => raw
                .parse()
                .map(Self::Method)
                .map_err(|()| invalid("source, homebrew, snap, pre-existing or none")),
            ValueKind::Path if raw.is_empty() => Ok(Self::Path(None)),
            ValueKind::Path => {
                let path = PathBuf::from(raw);
                if path.is_absolute() {
                    Ok(Self::Path(Some(path)))
                } else {
                    Err(invalid(ABSOLUTE_PATH))
                }
            }
            ValueKind::Timestamp if raw.is_empty() => Ok(Self::Timestamp(None)),
            ValueKind::Timestamp => NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
                .map(|t| Self::Timestamp(Some(t)))
                .map_err(|_| invalid("a YYYYMMDD_HHMMSS timestamp")),
        }
    }

    /// Value a freshly initialized ledger holds for `key`.
    pub(crate) fn default_for(key: LedgerKey, platform: Platform) -> Self {
        match key.kind() {
            ValueKind::Flag => Self::Flag(false),
            ValueKind::Platform => Self::Platform(platform),
            ValueKind::Method => Self::Method(InstallMethod::None),
            ValueKind::Path => Self::Path(None),
            ValueKind::Timestamp => Self::Timestamp(None),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Platform(p) => write!(f, "{p}"),
            Self::Method(m) => write!(f, "{m}"),
            Self::Path(Some(p)) => write!(f, "{}", p.display()),
            Self::Timestamp(Some(t)) => write!(f, "{}", t.format(TIMESTAMP_FORMAT)),
            Self::Path(None) | Self::Timestamp(None) => Ok(()),
        }
    }
}
