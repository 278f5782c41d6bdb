//! Core Interactor struct and shared plumbing.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::InteractorConfig;
use crate::error::{Error, Result};
use crate::locator::By;
use crate::session::{ElementHandle, Session};
use crate::wait::{self, Condition, WaitOptions};

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the facade.
pub(crate) struct InteractorInner {
    /// The browser session every operation runs against.
    pub(crate) session: Arc<dyn Session>,
    /// Wait, retry, and debug settings.
    pub(crate) config: InteractorConfig,
}

// ============================================================================
// Interactor
// ============================================================================

/// The element-interaction facade.
///
/// Composes the condition resolver, the retry engine, and the script
/// fallbacks behind one timeout-overloaded API. Cloning is cheap; clones
/// share the session and configuration.
#[derive(Clone)]
pub struct Interactor {
    pub(crate) inner: Arc<InteractorInner>,
}

impl fmt::Debug for Interactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactor")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl Interactor {
    /// Creates a facade over the session with default configuration.
    pub fn new(session: impl Session + 'static) -> Self {
        Self {
            inner: Arc::new(InteractorInner {
                session: Arc::new(session),
                config: InteractorConfig::new(),
            }),
        }
    }

    /// Creates a facade with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration fails validation.
    pub fn with_config(session: impl Session + 'static, config: InteractorConfig) -> Result<Self> {
        config.validate().map_err(Error::config)?;
        Ok(Self {
            inner: Arc::new(InteractorInner {
                session: Arc::new(session),
                config,
            }),
        })
    }
}

// ============================================================================
// Interactor - Accessors
// ============================================================================

impl Interactor {
    /// Returns the active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &InteractorConfig {
        &self.inner.config
    }

    /// Checks whether debug mode is on.
    #[inline]
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.inner.config.debug
    }

    /// Returns the default wait timeout.
    #[inline]
    #[must_use]
    pub fn default_timeout(&self) -> Duration {
        self.inner.config.wait_timeout
    }
}

// ============================================================================
// Interactor - Internal
// ============================================================================

impl Interactor {
    /// Returns the session as a trait object.
    pub(crate) fn session(&self) -> &dyn Session {
        self.inner.session.as_ref()
    }

    /// Wait options with the configured timeout and poll interval.
    pub(crate) fn wait_options(&self) -> WaitOptions {
        WaitOptions::from_config(&self.inner.config)
    }

    /// Wait options with an explicit timeout over the configured poll
    /// interval.
    pub(crate) fn wait_options_with(&self, timeout: Duration) -> WaitOptions {
        self.wait_options().with_timeout(timeout)
    }

    /// Resolves the locator under the condition within the timeout.
    pub(crate) async fn resolve(
        &self,
        by: &By,
        condition: &Condition,
        timeout: Duration,
    ) -> Result<ElementHandle> {
        wait::resolve(self.session(), by, condition, self.wait_options_with(timeout)).await
    }

    /// Resolves every matching element under the condition.
    pub(crate) async fn resolve_all(
        &self,
        by: &By,
        condition: &Condition,
        timeout: Duration,
    ) -> Result<Vec<ElementHandle>> {
        wait::resolve_all(self.session(), by, condition, self.wait_options_with(timeout)).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::mock::MockSession;

    #[test]
    fn test_interactor_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Interactor>();
    }

    #[test]
    fn test_interactor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Interactor>();
    }

    #[test]
    fn test_debug_omits_session() {
        let interactor = Interactor::new(MockSession::new());
        let rendered = format!("{interactor:?}");
        assert!(rendered.starts_with("Interactor"));
        assert!(rendered.contains("config"));
    }

    #[test]
    fn test_with_config_validates() {
        let config = InteractorConfig::new().with_poll_interval(Duration::ZERO);
        let err = Interactor::with_config(MockSession::new(), config).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_default_timeout_tracks_config() {
        let config = InteractorConfig::new().with_wait_timeout(Duration::from_secs(3));
        let interactor = Interactor::with_config(MockSession::new(), config).unwrap();
        assert_eq!(interactor.default_timeout(), Duration::from_secs(3));
    }
}
