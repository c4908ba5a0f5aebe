//! In-memory stand-ins for the host, shared by unit tests.

use anyhow::{bail, Result};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use crate::config::{Config, PathsConfig};
use crate::probe::Probe;
use crate::prompt::Prompt;
use crate::runner::{Cmd, Runner};

/// Records every command; fails those whose rendering contains a listed needle.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub commands: Vec<Cmd>,
    pub fail_matching: Vec<String>,
}

impl RecordingRunner {
    pub fn rendered(&self) -> Vec<String> {
        self.commands.iter().map(ToString::to_string).collect()
    }

    pub fn ran(&self, needle: &str) -> bool {
        self.rendered().iter().any(|c| c.contains(needle))
    }
}

impl Runner for RecordingRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<()> {
        self.commands.push(cmd.clone());
        let rendered = cmd.to_string();
        if self.fail_matching.iter().any(|n| rendered.contains(n.as_str())) {
            bail!("`{rendered}` exited with exit status: 1");
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeProbe {
    pub binaries: HashMap<String, PathBuf>,
    pub outputs: HashMap<String, String>,
    pub apps: HashMap<String, PathBuf>,
}

impl FakeProbe {
    pub fn with_binary(mut self, name: &str) -> Self {
        self.binaries
            .insert(name.to_string(), PathBuf::from("/usr/bin").join(name));
        self
    }

    pub fn with_output(mut self, command: &str, stdout: &str) -> Self {
        self.outputs.insert(command.to_string(), stdout.to_string());
        self
    }
}

impl Probe for FakeProbe {
    fn find(&self, binary: &str) -> Option<PathBuf> {
        self.binaries.get(binary).cloned()
    }

    fn capture(&self, program: &str, args: &[&str]) -> Option<String> {
        let key = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.outputs.get(&key).cloned()
    }

    fn app_bundle(&self, name: &str) -> Option<PathBuf> {
        self.apps.get(name).cloned()
    }
}

/// Answers confirmations from a script and remembers every question.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    pub answers: VecDeque<bool>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

/// Config whose every path lives under `root`.
pub fn config_under(root: &Path) -> Config {
    Config {
        paths: PathsConfig::under(root),
        ..Config::default()
    }
}
