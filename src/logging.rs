// src/logging.rs

//! Tracing setup for UI shells embedding the storefront core
//!
//! The core only emits `tracing` events. A shell that wants them on a console
//! or in a file calls [`init`] once at startup with the `logging` section of
//! its [`StoreConfig`](crate::config::StoreConfig).

use once_cell::sync::OnceCell;

use crate::config::LoggingConfig;
use crate::error::Result;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Keeps background log writers alive; drop it at shutdown to flush.
#[derive(Debug, Default)]
pub struct LoggingGuard {
    #[cfg(not(target_arch = "wasm32"))]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Whether a subscriber has been installed through [`init`]
pub fn is_initialized() -> bool {
    INSTALLED.get().is_some()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    use tracing_subscriber::{
        fmt, layer::Identity, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
    };

    use crate::config::LogFormat;
    use crate::error::{Error, ResultExt};

    // A bad level is reported even when a subscriber is already installed
    let filter = env_filter(&config.level)?;
    if is_initialized() {
        return Ok(LoggingGuard::default());
    }

    let registry = Registry::default().with(filter);

    let registry = if config.console.enabled {
        let base = fmt::layer()
            .with_ansi(config.console.colored)
            .with_target(true);
        let console_layer = match config.format {
            LogFormat::Json => base.json().boxed(),
            LogFormat::Pretty => base.pretty().boxed(),
            LogFormat::Compact => base.compact().boxed(),
        };
        registry.with(console_layer)
    } else {
        registry.with(Identity::new().boxed())
    };

    let mut file_guard = None;
    let registry = if let Some(file_config) = &config.file {
        let directory = file_config
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        std::fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

        let file_name = file_config
            .path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("sc-store.log"));
        let file_appender = tracing_appender::rolling::daily(directory, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        file_guard = Some(guard);

        registry.with(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed(),
        )
    } else {
        registry.with(Identity::new().boxed())
    };

    registry
        .try_init()
        .map_err(|e| Error::config(format!("Failed to install tracing subscriber: {}", e)))?;
    let _ = INSTALLED.set(());

    tracing::info!(level = %config.level, "Logging initialized");
    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn env_filter(level: &str) -> Result<tracing_subscriber::EnvFilter> {
    tracing_subscriber::EnvFilter::try_new(level).map_err(|e| {
        crate::error::Error::config_key("logging.level", format!("Invalid log level: {}", e))
    })
}

#[cfg(target_arch = "wasm32")]
pub fn init(_config: &LoggingConfig) -> Result<LoggingGuard> {
    if is_initialized() {
        return Ok(LoggingGuard::default());
    }

    if let Err(e) = tracing_wasm::try_set_as_global_default() {
        web_sys::console::error_1(&format!("Failed to set up tracing: {:?}", e).into());
    }
    let _ = INSTALLED.set(());
    Ok(LoggingGuard::default())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::config::ConsoleLogConfig;
    use crate::error::ErrorKind;

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = LoggingConfig {
            level: "sc_store=notalevel".to_string(),
            ..LoggingConfig::default()
        };
        let err = init(&config).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Configuration { .. }));
        assert!(env_filter("sc_store=debug,warn").is_ok());
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            console: ConsoleLogConfig {
                enabled: false,
                colored: false,
            },
            ..LoggingConfig::default()
        };

        // Another test binary or test may already own the global subscriber
        let first = init(&config);
        if first.is_ok() {
            assert!(is_initialized());
            assert!(init(&config).is_ok());
        }
    }
}
