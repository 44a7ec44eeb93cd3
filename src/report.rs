use std::fmt;

use serde::Serialize;

/// Per-step verdict. `Warn` covers "reachable but not in the expected state"
/// findings that should not fail the whole check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
    Skip,
}

impl CheckStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skip => "SKIP",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

/// Collected outcome of one check, rendered as plain console text at the end.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub check: String,
    pub steps: Vec<StepReport>,
    /// Free-form closing lines (the workflow check prints likely-cause hints).
    pub notes: Vec<String>,
}

impl CheckReport {
    pub fn new(check: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            steps: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        name: impl Into<String>,
        status: CheckStatus,
        detail: impl Into<String>,
    ) {
        self.steps.push(StepReport {
            name: name.into(),
            status,
            detail: detail.into(),
        });
    }

    pub fn pass(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.record(name, CheckStatus::Pass, detail);
    }

    pub fn warn(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.record(name, CheckStatus::Warn, detail);
    }

    pub fn fail(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.record(name, CheckStatus::Fail, detail);
    }

    pub fn skip(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.record(name, CheckStatus::Skip, detail);
    }

    pub fn note(&mut self, line: impl Into<String>) {
        self.notes.push(line.into());
    }

    /// A report passes when no step failed; warnings and skips are tolerated.
    pub fn passed(&self) -> bool {
        self.steps
            .iter()
            .all(|step| step.status != CheckStatus::Fail)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("== {} ==\n", self.check));
        for step in &self.steps {
            out.push_str(&format!(
                "{:4} {}: {}\n",
                step.status.label(),
                step.name,
                step.detail
            ));
        }
        for note in &self.notes {
            out.push_str(&format!("     {note}\n"));
        }
        out.push_str(&format!(
            "== {}: {} ==\n",
            self.check,
            if self.passed() { "ok" } else { "failed" }
        ));
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}
