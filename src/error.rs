//! Error types for the element-interaction core.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use webdriver_interactor::{By, Interactor, Result};
//!
//! async fn example(interactor: &Interactor) -> Result<()> {
//!     interactor.click(&By::css("#submit")).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Wait | [`Error::Timeout`], [`Error::NotFound`] |
//! | Interaction | [`Error::NotInteractable`], [`Error::StaleElement`] |
//! | Session | [`Error::Session`], [`Error::ScriptError`] |
//! | Configuration | [`Error::Config`], [`Error::InvalidArgument`] |
//! | External | [`Error::Io`], [`Error::Json`] |
//!
//! [`Error::StaleElement`] is the only variant the click retry loop absorbs;
//! every other failure propagates to the caller unchanged.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Wait Errors
    // ========================================================================
    /// Wait expired before the condition held.
    ///
    /// Returned when a polled condition is never satisfied within its
    /// timeout.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// Locator never resolved within the timeout.
    ///
    /// Returned when no element matching the locator appeared before the
    /// wait expired.
    #[error("Element not found: {selector} (waited {timeout_ms}ms)")]
    NotFound {
        /// Locator strategy and selector that failed to resolve.
        selector: String,
        /// Milliseconds waited before giving up.
        timeout_ms: u64,
    },

    // ========================================================================
    // Interaction Errors
    // ========================================================================
    /// Element was found but never reached an actionable state.
    ///
    /// Returned when the enabling poll exhausts its attempt cap, or when
    /// stale-click retries exceed theirs.
    #[error("Element not interactable: {selector} (after {attempts} attempts)")]
    NotInteractable {
        /// Locator strategy and selector of the stuck element.
        selector: String,
        /// Attempts consumed before giving up.
        attempts: u32,
    },

    /// Element handle is stale (no longer in the DOM).
    ///
    /// Returned when a handle was invalidated by a page re-render. The
    /// click retry loop absorbs this variant up to its attempt cap.
    #[error("Stale element: {element_id}")]
    StaleElement {
        /// The stale handle's session-scoped id.
        element_id: String,
    },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// Failure reported by the underlying browser session.
    ///
    /// Returned for driver-level failures that carry no element semantics.
    #[error("Session error: {message}")]
    Session {
        /// Description of the session failure.
        message: String,
    },

    /// JavaScript execution error.
    ///
    /// Returned when injected script execution fails in the page.
    #[error("Script error: {message}")]
    ScriptError {
        /// Error message from script execution.
        message: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when interactor configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Invalid argument passed to an operation.
    ///
    /// Returned when call parameters are unusable, such as an empty upload
    /// path list.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn not_found(selector: impl Into<String>, timeout_ms: u64) -> Self {
        Self::NotFound {
            selector: selector.into(),
            timeout_ms,
        }
    }

    /// Creates a not interactable error.
    #[inline]
    pub fn not_interactable(selector: impl Into<String>, attempts: u32) -> Self {
        Self::NotInteractable {
            selector: selector.into(),
            attempts,
        }
    }

    /// Creates a stale element error.
    #[inline]
    pub fn stale_element(element_id: impl Into<String>) -> Self {
        Self::StaleElement {
            element_id: element_id.into(),
        }
    }

    /// Creates a session error.
    #[inline]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Creates a script error.
    #[inline]
    pub fn script_error(message: impl Into<String>) -> Self {
        Self::ScriptError {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a wait expiry.
    ///
    /// [`Error::NotFound`] and [`Error::NotInteractable`] count: both are
    /// timeouts that carry extra classification.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::NotFound { .. } | Self::NotInteractable { .. }
        )
    }

    /// Returns `true` if this is a stale element reference.
    ///
    /// The click retry loop re-resolves and retries exactly this variant;
    /// nothing else re-enters the loop.
    #[inline]
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleElement { .. })
    }

    /// Returns `true` if this is an element error.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotInteractable { .. } | Self::StaleElement { .. }
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors may succeed on retry.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::StaleElement { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
