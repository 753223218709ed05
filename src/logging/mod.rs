// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging infrastructure using the `tracing` ecosystem.
//!
//! ```text
//! init_logging(&LogConfig)
//!        |
//!        v
//!    registry
//!    |         |
//!    v         v
//! Console     File (optional)
//! stderr      append, non_blocking
//! ANSI if tty timestamps, targets
//!    |         |
//!    v         v
//!   EnvFilter per layer
//!        |
//!        v
//!    LogGuard (flush on drop)
//!
//! LogLevel:  0=OFF  1=ERROR  2=WARN  3=INFO
//!            4=DEBUG  5=TRACE  6=DUMP(+gix and other libs)
//! ```
//!
//! Console output goes to stderr; stdout is reserved for command results
//! and the push prompt.

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{ConfigError, Result};

/// Log level (0-6) for configuration.
///
/// - 0: Silent - no output at all
/// - 1: Error - only errors
/// - 2: Warn - errors and warnings, including rolled back updates
/// - 3: Info - default, per-mod progress and the release summary
/// - 4: Debug - subprocess command lines and git invocations
/// - 5: Trace - every line the package tool prints
/// - 6: Dump - trace, plus events from dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LogLevel(u8);

impl Default for LogLevel {
    fn default() -> Self {
        Self::INFO
    }
}

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);
    pub const DUMP: Self = Self(6);

    /// # Errors
    ///
    /// `ConfigError::InvalidValue` above 6.
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        Self::from_u8(level).ok_or_else(|| ConfigError::InvalidValue {
            section: "global".to_string(),
            key: "log_level".to_string(),
            message: format!("log level must be 0-6, got {level}"),
        })
    }

    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn from_u8(level: u8) -> Option<Self> {
        if level <= 6 { Some(Self(level)) } else { None }
    }

    const fn level_name(self) -> &'static str {
        match self.0 {
            0 => "off",
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            _ => "trace",
        }
    }

    /// `EnvFilter` directives for this level.
    ///
    /// Up to `TRACE` only this crate's events pass; dependencies stay at
    /// `warn`. `DUMP` lets everything through.
    #[must_use]
    pub fn filter_directives(self) -> String {
        match self.0 {
            0 => "off".to_string(),
            1 | 2 => self.level_name().to_string(),
            3..=5 => format!("warn,{}={}", env!("CARGO_CRATE_NAME"), self.level_name()),
            _ => "trace".to_string(),
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

/// Where log events go and how much of them.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::INFO)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::TRACE)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file))]
    log_file: Option<String>,
    /// Colored console output; detected from stderr when unset.
    #[builder(setters(name = with_ansi))]
    ansi: Option<bool>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    /// Whether the console layer emits ANSI colors.
    #[must_use]
    pub fn ansi(&self) -> bool {
        self.ansi.unwrap_or_else(|| std::io::stderr().is_terminal())
    }
}

/// Hold until exit; dropping it flushes the file writer.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Opens `path` for appending, creating parent directories.
fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a subscriber is already set.
///
/// # Example
///
/// ```no_run
/// use packup_rs::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::INFO)
///     .with_file_level(LogLevel::DEBUG)
///     .with_log_file("packup.log".to_string())
///     .build();
///
/// let _guard = init_logging(&config)?;
/// tracing::info!("Logging initialized");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(config.ansi())
        .with_filter(EnvFilter::new(config.console_level().filter_directives()));

    let (file_layer, file_guard) = match config.log_file() {
        Some(log_path) => {
            let file = open_log_file(Path::new(log_path))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);

            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_ansi(false)
                .with_filter(EnvFilter::new(config.file_level().filter_directives()));

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install the global tracing subscriber")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}
