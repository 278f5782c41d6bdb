//! Page readiness, condition waits, and pauses.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::error::Result;
use crate::locator::By;
use crate::session::ElementHandle;
use crate::wait::{self, Condition};

use super::Interactor;

// ============================================================================
// Constants
// ============================================================================

/// Probe evaluated against `document.readyState`.
const READY_STATE: &str = "return document.readyState";

// ============================================================================
// Interactor - Page Load
// ============================================================================

impl Interactor {
    /// Waits until the document reports a complete ready state.
    ///
    /// Probes `document.readyState` a bounded number of times with fixed
    /// spacing, then falls into one blocking wait for the remainder of
    /// the timeout.
    pub async fn wait_for_page_load(&self) -> Result<()> {
        self.wait_for_page_load_timeout(self.default_timeout())
            .await
    }

    /// Page-load wait with an explicit timeout for the final blocking
    /// wait.
    pub async fn wait_for_page_load_timeout(&self, timeout: Duration) -> Result<()> {
        let retries = self.inner.config.page_ready_retries;
        let spacing = self.inner.config.page_ready_spacing;

        for attempt in 1..=retries {
            if self.document_ready().await? {
                debug!(attempt, "Document ready");
                return Ok(());
            }
            debug!(attempt, max = retries, "Document not ready, waiting");
            sleep(spacing).await;
        }

        wait::wait_for(
            self.session(),
            &Condition::document_ready(),
            self.wait_options_with(timeout),
        )
        .await
    }

    async fn document_ready(&self) -> Result<bool> {
        let state = self.session().execute_script(READY_STATE, &[]).await?;
        Ok(state.as_str() == Some("complete"))
    }
}

// ============================================================================
// Interactor - Condition Waits
// ============================================================================

impl Interactor {
    /// Waits until the condition holds for the locator and returns the
    /// first satisfying element.
    ///
    /// Composite conditions evaluate as one wait unit per poll, so an
    /// AND or OR never races between separately awaited halves.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let badge = interactor
    ///     .wait_until(&By::css(".cart-badge"), &Condition::visible().and(Condition::text_is("3")))
    ///     .await?;
    /// ```
    pub async fn wait_until(&self, by: &By, condition: &Condition) -> Result<ElementHandle> {
        self.wait_until_timeout(by, condition, self.default_timeout())
            .await
    }

    /// Condition wait with an explicit timeout.
    pub async fn wait_until_timeout(
        &self,
        by: &By,
        condition: &Condition,
        timeout: Duration,
    ) -> Result<ElementHandle> {
        self.resolve(by, condition, timeout).await
    }

    /// Waits on a locator-scoped condition without requiring a resolved
    /// element, so vacuous conditions like invisibility can succeed on an
    /// empty match set.
    pub async fn wait_until_gone(&self, by: &By) -> Result<()> {
        self.wait_until_gone_timeout(by, self.default_timeout())
            .await
    }

    /// Disappearance wait with an explicit timeout.
    pub async fn wait_until_gone_timeout(&self, by: &By, timeout: Duration) -> Result<()> {
        wait::wait_until(
            self.session(),
            by,
            &Condition::invisible(),
            self.wait_options_with(timeout),
        )
        .await
    }

    /// Waits on a document-scoped condition with no locator.
    pub async fn wait_for(&self, condition: &Condition) -> Result<()> {
        self.wait_for_timeout(condition, self.default_timeout())
            .await
    }

    /// Document-scoped wait with an explicit timeout.
    pub async fn wait_for_timeout(&self, condition: &Condition, timeout: Duration) -> Result<()> {
        wait::wait_for(self.session(), condition, self.wait_options_with(timeout)).await
    }

    /// Unconditional pause.
    ///
    /// A last resort for pages whose readiness nothing observable
    /// signals.
    pub async fn hard_pause(&self, duration: Duration) {
        debug!(ms = duration.as_millis() as u64, "Hard pause");
        sleep(duration).await;
    }
}

// ============================================================================
// Interactor - Document Reads
// ============================================================================

impl Interactor {
    /// Returns the current document URL.
    pub async fn current_url(&self) -> Result<String> {
        self.session().current_url().await
    }

    /// Returns the current document title.
    pub async fn title(&self) -> Result<String> {
        self.session().get_title().await
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
    use crate::error::Error;
    use crate::mock::MockSession;

    fn fast() -> InteractorConfig {
        InteractorConfig::new()
            .with_wait_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(100))
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_load_returns_on_first_probe() {
        let session = MockSession::new();
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let start = Instant::now();
        interactor.wait_for_page_load().await.unwrap();

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(session.scripts_matching("readyState").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_load_spaces_bounded_probes() {
        let session = MockSession::new();
        session.set_ready_state("loading");
        let mut config = fast();
        config.page_ready_retries = 3;
        let interactor = Interactor::with_config(session.clone(), config).unwrap();

        let err = interactor
            .wait_for_page_load_timeout(Duration::from_millis(300))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Timeout { .. }));
        // Three spaced probes, then the blocking wait's own polls.
        assert!(session.scripts_matching("readyState").len() > 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_load_recovers_during_spaced_probes() {
        let session = MockSession::new();
        session.set_ready_state("interactive");
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let writer = session.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(1500)).await;
            writer.set_ready_state("complete");
        });

        let start = Instant::now();
        interactor.wait_for_page_load().await.unwrap();

        // First probe at 0s fails, second at 1s fails, third at 2s passes.
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_returns_satisfying_element() {
        let session = MockSession::new();
        session.add_element(".badge", |e| e.with_text("3"));
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let handle = interactor
            .wait_until(
                &By::css(".badge"),
                &Condition::visible().and(Condition::text_is("3")),
            )
            .await
            .unwrap();
        assert!(!handle.id().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_gone_succeeds_on_absence() {
        let session = MockSession::new();
        let interactor = Interactor::with_config(session, fast()).unwrap();

        interactor
            .wait_until_gone(&By::css(".spinner"))
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_document_condition() {
        let session = MockSession::new();
        session.set_title("Checkout - ACME");
        let interactor = Interactor::with_config(session, fast()).unwrap();

        interactor
            .wait_for(&Condition::title_contains("Checkout"))
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_hard_pause_sleeps_exactly() {
        let session = MockSession::new();
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let start = Instant::now();
        interactor.hard_pause(Duration::from_millis(750)).await;
        assert_eq!(start.elapsed(), Duration::from_millis(750));
    }

    #[tokio::test(start_paused = true)]
    async fn test_document_reads() {
        let session = MockSession::new();
        session.set_url("https://shop.example/cart");
        session.set_title("Cart");
        let interactor = Interactor::with_config(session, fast()).unwrap();

        assert_eq!(
            interactor.current_url().await.unwrap(),
            "https://shop.example/cart"
        );
        assert_eq!(interactor.title().await.unwrap(), "Cart");
    }
}
