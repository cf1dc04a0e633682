// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Price at index {index} must be positive, got {price}")]
    NonPositivePrice { index: usize, price: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
