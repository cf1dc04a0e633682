// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, OptimizerSettings, Settings, WindowRange};

/// Loads the application settings from the `config/` directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from("config")
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings_from(dir: impl AsRef<Path>) -> Result<Settings> {
    let dir = dir.as_ref();
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::from(dir.join("base")))
        // 2. Load the environment-specific configuration file.
        .add_source(File::from(dir.join(&environment)).required(false))
        // 3. Load settings from environment variables (e.g., `APP_BOT__SHORT_WINDOW=20`).
        // The prefix is `APP_`, nested keys are separated by `__`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;
    if let Some(optimizer) = &settings.optimizer {
        optimizer.validate()?;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strategies::types::SignalMode;

    #[test]
    fn loads_base_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            r#"
[app]
log_level = "debug"

[bot]
short_window = 3
long_window = 5
signal_mode = "crossover"

[optimizer]
short_window = { start = 2, end = 6, step = 2 }
long_window = { start = 10, end = 20 }
"#,
        )
        .unwrap();

        let settings = load_settings_from(dir.path()).unwrap();
        assert_eq!(settings.app.log_level, "debug");
        assert_eq!(settings.bot.short_window, 3);
        assert_eq!(settings.bot.long_window, 5);
        assert_eq!(settings.bot.stop_loss_percent, 5.0);
        assert_eq!(settings.bot.signal_mode, SignalMode::Crossover);

        let optimizer = settings.optimizer.unwrap();
        assert_eq!(optimizer.short_window.values(), vec![2, 4, 6]);
        assert_eq!(optimizer.long_window.values().len(), 11);
        assert_eq!(optimizer.top_n, 5);
    }

    #[test]
    fn missing_base_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_settings_from(dir.path()), Err(Error::LoadError(_))));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            r#"
[optimizer]
short_window = { start = 9, end = 2 }
long_window = { start = 10, end = 20 }
"#,
        )
        .unwrap();
        assert!(matches!(
            load_settings_from(dir.path()),
            Err(Error::InvalidRange { field: "short_window", .. })
        ));
    }
}
