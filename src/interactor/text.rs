//! Text entry and the script value-assignment fallback.

use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::locator::By;
use crate::script;
use crate::wait::Condition;

use super::Interactor;

// ============================================================================
// Interactor - Text Entry
// ============================================================================

impl Interactor {
    /// Replaces the field's content with the given text.
    ///
    /// Resolves the element visible, waits for it to enable, clears the
    /// existing content, then sends the new value. Clearing first keeps
    /// repeated entry idempotent: entering `"A"` then `"B"` leaves `"B"`,
    /// never `"AB"`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// interactor.enter_text(&By::id("email"), "user@example.com").await?;
    /// ```
    pub async fn enter_text(&self, by: &By, text: &str) -> Result<()> {
        self.enter_text_timeout(by, text, self.default_timeout())
            .await
    }

    /// Text entry with an explicit resolution timeout.
    pub async fn enter_text_timeout(&self, by: &By, text: &str, timeout: Duration) -> Result<()> {
        let element = self.resolve(by, &Condition::visible(), timeout).await?;
        self.await_enabled(by, &element).await?;
        debug!(selector = %by, chars = text.len(), "Entering text");
        self.session().clear(&element).await?;
        self.session().send_keys(&element, text).await
    }
}

// ============================================================================
// Interactor - Script Value Assignment
// ============================================================================

impl Interactor {
    /// Assigns the field's value through injected script.
    ///
    /// For fields native typing cannot reach. The assignment replaces the
    /// value wholesale and fires the input and change events.
    pub async fn enter_text_via_script(&self, by: &By, text: &str) -> Result<()> {
        self.enter_text_via_script_timeout(by, text, self.default_timeout())
            .await
    }

    /// Script value assignment with an explicit resolution timeout.
    pub async fn enter_text_via_script_timeout(
        &self,
        by: &By,
        text: &str,
        timeout: Duration,
    ) -> Result<()> {
        let element = self.resolve(by, &Condition::present(), timeout).await?;
        script::assign_value(self.session(), &element, text).await
    }
}

// ============================================================================
// Tests
// ============================================================================
