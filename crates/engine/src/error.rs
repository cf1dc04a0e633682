// In crates/engine/src/error.rs

use thiserror::Error;

/// Reasons a bot configuration is rejected. The messages are part of the public contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("short_window must be less than long_window")]
    WindowOrder,

    #[error("window sizes must be positive")]
    NonPositiveWindow,

    #[error("stop_loss_percent must be positive")]
    NonPositiveStopLoss,

    #[error("amount must be positive")]
    NonPositiveAmount,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
