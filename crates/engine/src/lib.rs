// In crates/engine/src/lib.rs

pub mod bot;
pub mod config;
pub mod error;

pub use bot::{BotState, SmaBot};
pub use config::SmaBotConfig;
pub use error::{ConfigError, Result};
pub use strategies::types::SignalMode;
