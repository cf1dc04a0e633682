// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid optimizer range for {field}: start {start} > end {end} or zero step")]
    InvalidRange {
        field: &'static str,
        start: usize,
        end: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
