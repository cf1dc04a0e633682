// In crates/risk/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("A position opened at index {entry_index} is still open")]
    PositionAlreadyOpen { entry_index: usize },

    #[error("There is no open position to close")]
    NoOpenPosition,
}

pub type Result<T> = std::result::Result<T, Error>;
