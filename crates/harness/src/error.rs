use std::io;

use sdk::ApiError;

/// Errors that stop the harness itself, as opposed to failing a scenario.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Could not create client: {0}")]
    Client(#[source] ApiError),

    #[error("Console error: {0}")]
    Console(#[from] io::Error),

    #[error("Harness run already started")]
    AlreadyStarted,
}
