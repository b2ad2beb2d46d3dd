// tracediff - EVM execution trace diff viewer
// Copyright (C) 2025 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Logging configuration for tracediff components.
//!
//! Provides centralized logging setup with:
//! - Console output with structured formatting
//! - Optional file logging to a temporary directory
//! - Environment variable support (RUST_LOG)

use eyre::Result;
use std::{env, fs, path::PathBuf, sync::Once};
use tracing::Level;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging for a tracediff component.
///
/// The interactive terminal UI owns the screen, so it runs with
/// `console = false` and file logging only; the other entry points log to
/// the console. `RUST_LOG` overrides the default INFO level.
pub fn init_logging(component_name: &str, console: bool, file: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| eyre::eyre!("failed to create environment filter: {e}"))?;

    let console_layer = if console {
        Some(fmt::layer().with_target(true).with_ansi(true).compact())
    } else {
        None
    };

    let file_layer = if file {
        let log_dir = create_log_directory(component_name)?;
        let file_appender = rolling::daily(&log_dir, format!("{component_name}.log"));
        let (non_blocking_appender, guard) = non_blocking(file_appender);

        // Keep the writer guard alive for the process lifetime.
        std::mem::forget(guard);

        Some(fmt::layer().with_target(true).with_ansi(false).with_writer(non_blocking_appender))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| eyre::eyre!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(component = component_name, console, file, "Logging initialized");

    Ok(())
}

/// Create the component's log directory in the system temp folder.
fn create_log_directory(component_name: &str) -> Result<PathBuf> {
    let temp_dir = env::temp_dir();
    let log_dir = temp_dir.join("tracediff-logs").join(component_name);

    fs::create_dir_all(&log_dir)?;

    Ok(log_dir)
}

/// Initialize simple logging (console only, no fancy formatting).
///
/// This is useful for tests or simple utilities that don't need
/// the full logging setup.
pub fn init_simple_logging(level: Level) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .map_err(|e| eyre::eyre!("failed to create environment filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| eyre::eyre!("failed to initialize simple logging: {e}"))?;

    Ok(())
}

// Global test logging initialization - ensures logging is only set up once across all tests
static TEST_LOGGING_INIT: Once = Once::new();

/// Safe logging initialization for tests - can be called multiple times
/// without crashing. Console-only, INFO by default, `RUST_LOG` respected.
pub fn ensure_test_logging(default_level: Option<Level>) {
    TEST_LOGGING_INIT.call_once(|| {
        let default_level = default_level.unwrap_or(Level::INFO);
        let _ = init_simple_logging(default_level);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, error, info, warn};

    #[test]
    fn test_logging_functions_work() {
        ensure_test_logging(None);

        info!("Test info message");
        warn!("Test warning message");
        debug!("Test debug message");
        error!("Test error message");
    }

    #[test]
    fn test_log_directory_creation() {
        let result = create_log_directory("test-component");
        assert!(result.is_ok());

        let log_dir = result.unwrap();
        assert!(log_dir.exists());
        assert!(log_dir.to_string_lossy().contains("tracediff-logs"));
        assert!(log_dir.to_string_lossy().contains("test-component"));
    }
}
