//! Viewport-gated scrolling and the debug highlight.

use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::locator::By;
use crate::script;
use crate::wait::Condition;

use super::Interactor;

// ============================================================================
// Interactor - Scrolling
// ============================================================================

impl Interactor {
    /// Scrolls the element's vertical center to the viewport's center.
    ///
    /// No-op when the element is already fully inside the viewport; the
    /// scroll position never changes in that case.
    pub async fn scroll_to_element(&self, by: &By) -> Result<()> {
        self.scroll_to_element_timeout(by, self.default_timeout())
            .await
    }

    /// Scroll with an explicit resolution timeout.
    pub async fn scroll_to_element_timeout(&self, by: &By, timeout: Duration) -> Result<()> {
        let element = self.resolve(by, &Condition::visible(), timeout).await?;
        let scrolled = script::ensure_in_view(self.session(), &element).await?;
        if scrolled {
            debug!(selector = %by, "Scrolled element into view");
        }
        Ok(())
    }
}

// ============================================================================
// Interactor - Highlight
// ============================================================================

impl Interactor {
    /// Outlines the element and pauses, for watching a run live.
    ///
    /// Does nothing outside debug mode.
    pub async fn highlight(&self, by: &By) -> Result<()> {
        self.highlight_timeout(by, self.default_timeout()).await
    }

    /// Highlight with an explicit resolution timeout.
    pub async fn highlight_timeout(&self, by: &By, timeout: Duration) -> Result<()> {
        if !self.is_debug() {
            return Ok(());
        }
        let element = self.resolve(by, &Condition::visible(), timeout).await?;
        script::highlight(self.session(), &element, self.inner.config.highlight_pause).await
    }
}

// ============================================================================
// Tests
// ============================================================================
