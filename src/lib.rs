//! Verbex client SDK and conformance harness.
//!
//! The workspace is split in two crates, re-exported here:
//!
//! - [`sdk`]: the REST client. Wire normalization, response envelopes,
//!   typed models and the error taxonomy.
//! - [`harness`]: the conformance suite that drives every endpoint through
//!   the SDK and reports `[PASS]`/`[FAIL]` per scenario.

pub use harness;
pub use sdk;

pub use harness::{Harness, HarnessConfig, HarnessError, RunReport};
pub use sdk::{ApiError, ClientConfig, ResponseEnvelope, VerbexClient};
