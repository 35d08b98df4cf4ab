//! Run results and the console report.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::assert::ScenarioError;
use crate::scenario::{Scenario, ScenarioGroup};

const RULE_WIDTH: usize = 60;

/// Why a scenario failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FailureCause {
    /// A check on the response did not hold.
    Assertion(String),
    /// An SDK error the scenario did not expect.
    Unexpected { kind: String, message: String },
}

impl From<ScenarioError> for FailureCause {
    fn from(err: ScenarioError) -> Self {
        match err {
            ScenarioError::Assertion(text) => FailureCause::Assertion(text),
            ScenarioError::Api(err) => FailureCause::Unexpected {
                kind: err.error_code().to_string(),
                message: err.message(),
            },
        }
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Assertion(text) => f.write_str(text),
            FailureCause::Unexpected { kind, message } => write!(f, "{kind}: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub group: &'static str,
    pub elapsed: Duration,
    pub failure: Option<FailureCause>,
}

impl ScenarioOutcome {
    pub fn new(scenario: Scenario, elapsed: Duration, result: Result<(), ScenarioError>) -> Self {
        Self {
            name: scenario.name(),
            group: scenario.group().title(),
            elapsed,
            failure: result.err().map(FailureCause::from),
        }
    }

    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub outcomes: Vec<ScenarioOutcome>,
    /// Set when the run could not start or stopped early.
    pub aborted: Option<String>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            started_at,
            outcomes: Vec::new(),
            aborted: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Failed scenarios, plus one for an aborted run.
    pub fn failed(&self) -> usize {
        let failed = self.outcomes.iter().filter(|o| !o.passed()).count();
        failed + usize::from(self.aborted.is_some())
    }

    pub fn total(&self) -> usize {
        self.passed() + self.failed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    pub fn outcome(&self, name: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

/// Plain-text report writer. Logs go elsewhere; this is the human-facing output.
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn header(&mut self, text: &str) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out)?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "  {text}")?;
        writeln!(self.out, "{rule}")
    }

    pub fn run_details(
        &mut self,
        endpoint: &str,
        index_id: &str,
        started_at: &DateTime<Local>,
    ) -> io::Result<()> {
        writeln!(self.out, "  Endpoint: {endpoint}")?;
        writeln!(self.out, "  Test Index: {index_id}")?;
        writeln!(self.out, "  Started: {}", started_at.to_rfc3339())
    }

    pub fn group(&mut self, group: ScenarioGroup) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- {} ---", group.title())
    }

    pub fn outcome(&mut self, outcome: &ScenarioOutcome) -> io::Result<()> {
        let status = if outcome.passed() { "PASS" } else { "FAIL" };
        writeln!(
            self.out,
            "  [{status}] {} ({:.2}ms)",
            outcome.name,
            outcome.elapsed.as_secs_f64() * 1000.0
        )?;
        if let Some(failure) = &outcome.failure {
            writeln!(self.out, "         Error: {failure}")?;
        }
        Ok(())
    }

    pub fn fatal(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "  FATAL ERROR: {message}")
    }

    pub fn summary(&mut self, report: &RunReport) -> io::Result<()> {
        self.header("Test Summary")?;
        writeln!(self.out, "  Total Tests: {}", report.total())?;
        writeln!(self.out, "  Passed: {}", report.passed())?;
        writeln!(self.out, "  Failed: {}", report.failed())?;
        writeln!(self.out, "  Duration: {:.2}s", report.elapsed.as_secs_f64())?;
        let result = if report.all_passed() { "SUCCESS" } else { "FAILURE" };
        writeln!(self.out, "  Result: {result}")?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
