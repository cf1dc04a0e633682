// In crates/risk/src/lib.rs

pub mod error;
pub mod manager;
pub mod position;

// Re-export public types
pub use error::{Error, Result};
pub use manager::PositionManager;
pub use position::{ClosedPosition, ExitReason, StopLossPosition};
