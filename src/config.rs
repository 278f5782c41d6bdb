//! Interactor configuration.
//!
//! Provides a plain named-field configuration struct with documented
//! defaults. Waiting, retry caps, the debug-highlight gate, and the
//! download directory are all set here and read once at construction;
//! nothing in the crate consults ambient global state.
//!
//! # Example
//!
//! ```ignore
//! use webdriver_interactor::InteractorConfig;
//!
//! let config = InteractorConfig::new()
//!     .with_wait_timeout(Duration::from_secs(20))
//!     .with_debug()
//!     .with_download_dir("/tmp/downloads");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

// ============================================================================
// Defaults
// ============================================================================

/// Default wait timeout for element resolution.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default poll interval between condition checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Default attempt cap for the enabling poll.
pub const DEFAULT_ENABLE_ATTEMPTS: u32 = 15;

/// Default base unit for the enabling poll's linear backoff.
///
/// Attempt `n` waits `n` base units before re-checking.
pub const DEFAULT_ENABLE_BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// Default retry cap for stale-element click retries.
pub const DEFAULT_STALE_RETRIES: u32 = 10;

/// Default pause after a debug highlight.
pub const DEFAULT_HIGHLIGHT_PAUSE: Duration = Duration::from_secs(2);

/// Default bounded retry count for the page-ready poll.
pub const DEFAULT_PAGE_READY_RETRIES: u32 = 5;

/// Default spacing between page-ready poll retries.
pub const DEFAULT_PAGE_READY_SPACING: Duration = Duration::from_secs(1);

// ============================================================================
// InteractorConfig
// ============================================================================

/// Configuration for the interaction facade.
///
/// All fields are public; construct with [`InteractorConfig::new`] and
/// adjust through the builder methods, or set fields directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractorConfig {
    /// Timeout for element resolution waits.
    ///
    /// Defaults to [`DEFAULT_WAIT_TIMEOUT`] (15s).
    pub wait_timeout: Duration,

    /// Interval between condition polls.
    ///
    /// Defaults to [`DEFAULT_POLL_INTERVAL`] (500ms). Useful range is
    /// roughly 500ms to 2s.
    pub poll_interval: Duration,

    /// Attempt cap for the enabling poll.
    ///
    /// Defaults to [`DEFAULT_ENABLE_ATTEMPTS`] (15). Exhausting the cap is
    /// fatal for the calling step.
    pub enable_attempts: u32,

    /// Base unit for the enabling poll's linear backoff.
    ///
    /// Defaults to [`DEFAULT_ENABLE_BACKOFF_UNIT`] (1s); attempt `n` waits
    /// `n` units.
    pub enable_backoff_unit: Duration,

    /// Retry cap for stale-element click retries.
    ///
    /// Defaults to [`DEFAULT_STALE_RETRIES`] (10).
    pub stale_retries: u32,

    /// Pause after outlining an element in debug mode.
    ///
    /// Defaults to [`DEFAULT_HIGHLIGHT_PAUSE`] (2s).
    pub highlight_pause: Duration,

    /// Bounded retry count for the page-ready poll.
    ///
    /// Defaults to [`DEFAULT_PAGE_READY_RETRIES`] (5).
    pub page_ready_retries: u32,

    /// Spacing between page-ready poll retries.
    ///
    /// Defaults to [`DEFAULT_PAGE_READY_SPACING`] (1s).
    pub page_ready_spacing: Duration,

    /// Debug mode: gates the element highlight and its pause.
    ///
    /// Defaults to `false`.
    pub debug: bool,

    /// Directory polled by the download-verification composite.
    ///
    /// Defaults to `None`; download verification fails fast with a
    /// configuration error when unset.
    pub download_dir: Option<PathBuf>,
}

// ============================================================================
// Constructors
// ============================================================================

impl InteractorConfig {
    /// Creates a configuration with the documented defaults.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            enable_attempts: DEFAULT_ENABLE_ATTEMPTS,
            enable_backoff_unit: DEFAULT_ENABLE_BACKOFF_UNIT,
            stale_retries: DEFAULT_STALE_RETRIES,
            highlight_pause: DEFAULT_HIGHLIGHT_PAUSE,
            page_ready_retries: DEFAULT_PAGE_READY_RETRIES,
            page_ready_spacing: DEFAULT_PAGE_READY_SPACING,
            debug: false,
            download_dir: None,
        }
    }

    /// Creates a configuration from the defaults plus environment
    /// overrides.
    ///
    /// Recognized variables: `INTERACTOR_DEBUG` (bool),
    /// `INTERACTOR_TIMEOUT_MS` (u64), `INTERACTOR_POLL_MS` (u64),
    /// `INTERACTOR_DOWNLOAD_DIR` (path). Unset or empty variables keep the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a set variable fails to parse.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Some(value) = env_var("INTERACTOR_DEBUG") {
            config.debug = parse_bool("INTERACTOR_DEBUG", &value)?;
        }
        if let Some(value) = env_var("INTERACTOR_TIMEOUT_MS") {
            config.wait_timeout = Duration::from_millis(parse_u64("INTERACTOR_TIMEOUT_MS", &value)?);
        }
        if let Some(value) = env_var("INTERACTOR_POLL_MS") {
            config.poll_interval = Duration::from_millis(parse_u64("INTERACTOR_POLL_MS", &value)?);
        }
        if let Some(value) = env_var("INTERACTOR_DOWNLOAD_DIR") {
            config.download_dir = Some(PathBuf::from(value));
        }

        Ok(config)
    }
}

impl Default for InteractorConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl InteractorConfig {
    /// Sets the element-resolution wait timeout.
    #[inline]
    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Sets the condition poll interval.
    #[inline]
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the enabling-poll attempt cap.
    #[inline]
    #[must_use]
    pub fn with_enable_attempts(mut self, attempts: u32) -> Self {
        self.enable_attempts = attempts;
        self
    }

    /// Sets the stale-click retry cap.
    #[inline]
    #[must_use]
    pub fn with_stale_retries(mut self, retries: u32) -> Self {
        self.stale_retries = retries;
        self
    }

    /// Enables debug mode.
    #[inline]
    #[must_use]
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Sets the download directory.
    #[inline]
    #[must_use]
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl InteractorConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.poll_interval.is_zero() {
            return Err("Poll interval must be greater than zero".to_string());
        }
        if self.enable_attempts == 0 {
            return Err("Enabling attempt cap must be at least one".to_string());
        }
        if self.stale_retries == 0 {
            return Err("Stale retry cap must be at least one".to_string());
        }
        Ok(())
    }

    /// Returns `true` if debug mode is enabled.
    #[inline]
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.debug
    }
}

// ============================================================================
// Environment Parsing
// ============================================================================

fn env_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::config(format!("invalid boolean '{value}' for {field}"))),
    }
}

fn parse_u64(field: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|e| Error::config(format!("invalid number '{value}' for {field}: {e}")))
}

// ============================================================================
// Tests
// ============================================================================
