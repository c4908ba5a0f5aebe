use anyhow::Result;
use std::io::{BufRead, Write};

/// Yes/no confirmation from the user.
pub trait Prompt {
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Confirmation for removals that reach beyond this tool's own footprint.
    /// Implementations that auto-answer must still ask here.
    fn confirm_destructive(&mut self, question: &str) -> Result<bool> {
        self.confirm(question)
    }
}

/// Reads an answer line from stdin. Anything but `y`/`yes` is a no,
/// including end of input.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        eprint!("{question} [y/N]: ");
        std::io::stderr().flush().ok();

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(is_yes(&line))
    }
}

/// `--yes`: accepts routine confirmations, defers destructive ones to stdin.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        eprintln!("{question} [y/N]: y (--yes)");
        Ok(true)
    }

    fn confirm_destructive(&mut self, question: &str) -> Result<bool> {
        StdinPrompt.confirm(question)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::is_yes;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
