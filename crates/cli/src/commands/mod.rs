//! CLI command implementations.

pub mod cart;
pub mod catalog;

use cartkeeper_cart::{ConfigError, GatewayError};
use thiserror::Error;

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// A cart operation was rejected and the user was notified.
    Rejected,
}

impl Outcome {
    /// Process exit status: a rejected cart operation exits non-zero so
    /// scripts can tell it apart from a completed one.
    #[must_use]
    pub const fn exit_status(self) -> u8 {
        match self {
            Self::Done => 0,
            Self::Rejected => 1,
        }
    }
}

/// Errors that stop a command before it can run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Inventory error: {0}")]
    Gateway(#[from] GatewayError),
}
