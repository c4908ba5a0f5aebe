//! Subprocess execution behind a trait so install and uninstall can be
//! dry-run or driven from tests.


use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// A program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Prefix with `sudo` when `elevate` is set.
    #[must_use]
    pub fn sudo_if(self, elevate: bool) -> Self {
        if !elevate {
            return self;
        }
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: "sudo".to_string(),
            args,
            cwd: self.cwd,
        }
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg.replace('\'', "'\\''"))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

pub trait Runner {
    /// Run `cmd` to completion. A non-zero exit status is an error.
    fn run(&mut self, cmd: &Cmd) -> Result<()>;

    /// Whether this runner only pretends.
    fn is_dry_run(&self) -> bool {
        false
    }

    /// Make binaries in `dir` visible to later commands and probes.
    fn prepend_path(&mut self, _dir: &Path) {}
}

/// Runs commands for real, inheriting stdio so package managers can prompt.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<()> {
        debug!("Running: {cmd}");
        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args);
        if let Some(dir) = &cmd.cwd {
            command.current_dir(dir);
        }
        let status = command
            .status()
            .with_context(|| format!("Failed to run `{}`", cmd.program))?;
        if !status.success() {
            bail!("`{cmd}` exited with {status}");
        }
        Ok(())
    }

    fn prepend_path(&mut self, dir: &Path) {
        let mut paths = vec![dir.to_path_buf()];
        if let Some(current) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&current));
        }
        if let Ok(joined) = std::env::join_paths(paths) {
            std::env::set_var("PATH", joined);
        }
    }
}

/// Logs each command instead of running it.
#[derive(Debug, Default)]
pub struct DryRun;

impl Runner for DryRun {
    fn run(&mut self, cmd: &Cmd) -> Result<()> {
        match &cmd.cwd {
            Some(dir) => info!("[dry-run] (in {}) {cmd}", dir.display()),
            None => info!("[dry-run] {cmd}"),
        }
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
