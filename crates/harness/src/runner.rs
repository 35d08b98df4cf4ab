use std::io::Write;
use std::time::Instant;

use chrono::Local;
use sdk::VerbexClient;

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::report::{Console, RunReport, ScenarioOutcome};
use crate::scenario::ScenarioGroup;
use crate::suite::{short_id, Suite};

pub const TITLE: &str = "Verbex SDK Test Harness - Rust";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
}

/// One conformance run against one server.
///
/// `run` may be called once; the harness moves `NotStarted → Running →
/// Completed` and a second call fails with [`HarnessError::AlreadyStarted`].
pub struct Harness<W: Write> {
    endpoint: String,
    access_key: String,
    settings: HarnessConfig,
    index_id: String,
    console: Console<W>,
    state: RunState,
}

impl<W: Write> Harness<W> {
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        settings: HarnessConfig,
        out: W,
    ) -> Self {
        let index_id = format!("{}-{}", settings.index_prefix, short_id());
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            settings,
            index_id,
            console: Console::new(out),
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn index_id(&self) -> &str {
        &self.index_id
    }

    pub fn into_output(self) -> W {
        self.console.into_inner()
    }

    pub async fn run(&mut self) -> Result<RunReport, HarnessError> {
        if self.state != RunState::NotStarted {
            return Err(HarnessError::AlreadyStarted);
        }
        self.state = RunState::Running;

        let result = self.run_scenarios().await;
        self.state = RunState::Completed;
        result
    }

    async fn run_scenarios(&mut self) -> Result<RunReport, HarnessError> {
        let started = Instant::now();
        let mut report = RunReport::new(Local::now());

        tracing::info!(endpoint = %self.endpoint, index_id = %self.index_id, "conformance run started");
        self.console.header(TITLE)?;
        self.console
            .run_details(&self.endpoint, &self.index_id, &report.started_at)?;

        let client_config = self.settings.client_config(&self.endpoint, &self.access_key);
        match VerbexClient::new(&client_config) {
            Ok(client) => {
                let mut suite = Suite::new(
                    client,
                    self.settings.clone(),
                    &self.endpoint,
                    self.index_id.clone(),
                );
                let executed = self.run_suite(&mut suite, &mut report).await;
                suite.close();
                executed?;
            }
            Err(err) => {
                let err = HarnessError::Client(err);
                tracing::error!(error = %err, "conformance run aborted");
                self.console.fatal(&err.to_string())?;
                report.aborted = Some(err.to_string());
            }
        }

        report.elapsed = started.elapsed();
        self.console.summary(&report)?;
        tracing::info!(
            passed = report.passed(),
            failed = report.failed(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "conformance run finished"
        );
        Ok(report)
    }

    async fn run_suite(&mut self, suite: &mut Suite, report: &mut RunReport) -> Result<(), HarnessError> {
        for group in ScenarioGroup::ALL {
            self.console.group(group)?;
            for scenario in group.scenarios() {
                let started = Instant::now();
                let result = suite.execute(scenario).await;
                let outcome = ScenarioOutcome::new(scenario, started.elapsed(), result);
                tracing::debug!(
                    scenario = outcome.name,
                    passed = outcome.passed(),
                    "scenario finished"
                );
                self.console.outcome(&outcome)?;
                report.outcomes.push(outcome);
            }
        }
        Ok(())
    }
}
