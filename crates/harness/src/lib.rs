//! Verbex conformance harness
//!
//! Runs a fixed, ordered catalogue of scenarios against a live Verbex server
//! through the SDK and prints one `[PASS]`/`[FAIL]` line per scenario plus a
//! summary. Scenarios share one generated test index and run strictly one
//! after another; a failing scenario never stops the run.
//!
//! ```no_run
//! use harness::{Harness, HarnessConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), harness::HarnessError> {
//!     let mut run = Harness::new("http://localhost:8080", "verbexadmin", HarnessConfig::default(), std::io::stdout());
//!     let report = run.run().await?;
//!     std::process::exit(i32::from(report.exit_code()));
//! }
//! ```

pub mod assert;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod suite;

pub use config::{HarnessConfig, LogFormat};
pub use error::HarnessError;
pub use report::{Console, FailureCause, RunReport, ScenarioOutcome};
pub use runner::{Harness, RunState};
pub use scenario::{Scenario, ScenarioGroup};
