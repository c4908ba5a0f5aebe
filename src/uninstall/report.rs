use std::fmt;

/// What happened to one removal step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded(String),
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub outcome: StepOutcome,
}

/// Outcome of every removal step, in the order they ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    pub steps: Vec<Step>,
}

impl UninstallReport {
    pub(super) fn push(&mut self, name: impl Into<String>, outcome: StepOutcome) {
        self.steps.push(Step {
            name: name.into(),
            outcome,
        });
    }

    pub fn outcome(&self, name: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.name == name).map(|s| &s.outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Step> {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Failed(_)))
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

impl fmt::Display for UninstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.steps.iter().map(|s| s.name.len()).max().unwrap_or(0);
        for step in &self.steps {
            let (tag, detail) = match &step.outcome {
                StepOutcome::Succeeded(d) => ("removed", d),
                StepOutcome::Skipped(d) => ("skipped", d),
                StepOutcome::Failed(d) => ("FAILED ", d),
            };
            writeln!(f, "  {:<width$}  {tag}  {detail}", step.name)?;
        }
        Ok(())
    }
}
