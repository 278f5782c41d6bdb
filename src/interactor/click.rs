//! Click with staleness retries, and the script-click fallback.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::error::{Error, Result};
use crate::locator::By;
use crate::script;
use crate::session::ElementHandle;
use crate::wait::Condition;

use super::Interactor;

// ============================================================================
// Interactor - Click
// ============================================================================

impl Interactor {
    /// Clicks the element once it is clickable.
    ///
    /// Resolution, the enabling poll, and the click run as one unit. A
    /// stale element anywhere in that unit re-resolves and retries, up to
    /// the configured retry cap. Any other failure propagates
    /// immediately.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the locator never matches,
    /// [`Error::Timeout`] when no match becomes clickable, and
    /// [`Error::NotInteractable`] when the element never enables or
    /// staleness outlasts the retry cap.
    ///
    /// # Example
    ///
    /// ```ignore
    /// interactor.click(&By::css("button[type=submit]")).await?;
    /// ```
    pub async fn click(&self, by: &By) -> Result<()> {
        self.click_timeout(by, self.default_timeout()).await
    }

    /// Clicks the element with an explicit resolution timeout.
    pub async fn click_timeout(&self, by: &By, timeout: Duration) -> Result<()> {
        let cap = self.inner.config.stale_retries;
        let mut retries = 0u32;

        loop {
            match self.click_once(by, timeout).await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_stale() && retries < cap => {
                    retries += 1;
                    debug!(
                        selector = %by,
                        retry = retries,
                        max = cap,
                        "Stale element during click, re-resolving"
                    );
                }
                Err(err) if err.is_stale() => {
                    return Err(Error::not_interactable(by.to_string(), retries));
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One resolution-to-click pass.
    async fn click_once(&self, by: &By, timeout: Duration) -> Result<()> {
        let element = self.resolve(by, &Condition::clickable(), timeout).await?;
        self.await_enabled(by, &element).await?;
        debug!(selector = %by, element = %element, "Clicking");
        self.session().click(&element).await
    }
}

// ============================================================================
// Interactor - Script Click
// ============================================================================

impl Interactor {
    /// Clicks through injected script rather than the native click.
    ///
    /// For targets the native click cannot reach, typically elements
    /// behind overlays. Only presence is required.
    pub async fn click_via_script(&self, by: &By) -> Result<()> {
        self.click_via_script_timeout(by, self.default_timeout())
            .await
    }

    /// Script click with an explicit resolution timeout.
    pub async fn click_via_script_timeout(&self, by: &By, timeout: Duration) -> Result<()> {
        let element = self.resolve(by, &Condition::present(), timeout).await?;
        script::click(self.session(), &element).await
    }
}

// ============================================================================
// Interactor - Enabling Poll
// ============================================================================

impl Interactor {
    /// Waits for the element to report an enabled state.
    ///
    /// Attempt `n` sleeps `n` backoff units before re-checking. Exhausting
    /// the attempt cap is fatal for the calling step.
    pub(crate) async fn await_enabled(&self, by: &By, element: &ElementHandle) -> Result<()> {
        if self.session().is_enabled(element).await? {
            return Ok(());
        }

        let attempts = self.inner.config.enable_attempts;
        let unit = self.inner.config.enable_backoff_unit;

        for attempt in 1..=attempts {
            debug!(selector = %by, attempt, max = attempts, "Element disabled, backing off");
            sleep(unit * attempt).await;
            if self.session().is_enabled(element).await? {
                return Ok(());
            }
        }

        Err(Error::not_interactable(by.to_string(), attempts))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::time::Instant;

    use crate::config::InteractorConfig;
    use crate::mock::MockSession;

    fn fast() -> InteractorConfig {
        InteractorConfig::new()
            .with_wait_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(100))
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_enabled_element_clicks_once() {
        let session = MockSession::new();
        let button = session.add_element("#submit", |e| e);
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let start = Instant::now();
        interactor.click(&By::css("#submit")).await.unwrap();

        assert_eq!(session.click_count(&button), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_waits_out_disabled_phase() {
        let session = MockSession::new();
        let button = session.add_element("#submit", |e| e.enabled_after_checks(3));
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let start = Instant::now();
        interactor.click(&By::css("#submit")).await.unwrap();

        // The clickable condition absorbs the three disabled polls.
        assert_eq!(start.elapsed(), Duration::from_millis(300));
        assert_eq!(session.click_count(&button), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enabling_poll_backs_off_linearly() {
        let session = MockSession::new();
        let button = session.add_element("#submit", |e| e.enabled_after_checks(3));
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let start = Instant::now();
        interactor
            .await_enabled(&By::css("#submit"), &button)
            .await
            .unwrap();

        // Sleeps 1 + 2 + 3 backoff units before the fourth check passes.
        assert_eq!(start.elapsed(), Duration::from_secs(6));
        assert_eq!(session.enabled_check_count(&button), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enabling_poll_cap_is_fatal() {
        let session = MockSession::new();
        let button = session.add_element("#submit", |e| e.enabled_after_checks(99));
        let config = fast().with_enable_attempts(3);
        let interactor = Interactor::with_config(session.clone(), config).unwrap();

        let err = interactor
            .await_enabled(&By::css("#submit"), &button)
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::NotInteractable { attempts: 3, .. }),
            "got {err}"
        );
        assert_eq!(session.enabled_check_count(&button), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_retries_through_staleness() {
        let session = MockSession::new();
        let button = session.add_element("#submit", |e| e.stale_first_clicks(2));
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        interactor.click(&By::css("#submit")).await.unwrap();

        assert_eq!(session.click_count(&button), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_stale_cap_reclassifies() {
        let session = MockSession::new();
        let button = session.add_element("#submit", |e| e.stale_first_clicks(99));
        let config = fast().with_stale_retries(2);
        let interactor = Interactor::with_config(session.clone(), config).unwrap();

        let err = interactor.click(&By::css("#submit")).await.unwrap_err();

        assert!(matches!(err, Error::NotInteractable { attempts: 2, .. }));
        assert_eq!(session.click_count(&button), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_fails_fast_on_non_stale_error() {
        let session = MockSession::new();
        let button = session.add_element("#submit", |e| e.click_fails("click intercepted"));
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let err = interactor.click(&By::css("#submit")).await.unwrap_err();

        assert!(matches!(err, Error::Session { .. }));
        assert_eq!(session.click_count(&button), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_missing_element_is_not_found() {
        let session = MockSession::new();
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let err = interactor
            .click_timeout(&By::css("#ghost"), Duration::from_millis(300))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_hidden_element_times_out() {
        let session = MockSession::new();
        session.add_element("#submit", |e| e.visible(false));
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let err = interactor
            .click_timeout(&By::css("#submit"), Duration::from_millis(300))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_via_script_needs_only_presence() {
        let session = MockSession::new();
        let covered = session.add_element("#covered", |e| e.visible(false));
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        interactor
            .click_via_script(&By::css("#covered"))
            .await
            .unwrap();

        // The native click path is never touched.
        assert_eq!(session.click_count(&covered), 0);
        assert_eq!(session.scripts_matching("arguments[0].click()").len(), 1);
    }
}
