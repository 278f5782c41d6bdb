//! Frame switching.

use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::locator::By;
use crate::wait::Condition;

use super::Interactor;

// ============================================================================
// Interactor - Frames
// ============================================================================

impl Interactor {
    /// Switches the session context into the located frame.
    ///
    /// Subsequent operations resolve inside that frame until
    /// [`switch_to_default_content`](Self::switch_to_default_content)
    /// restores the top document.
    pub async fn switch_into_frame(&self, by: &By) -> Result<()> {
        self.switch_into_frame_timeout(by, self.default_timeout())
            .await
    }

    /// Frame switch with an explicit resolution timeout.
    pub async fn switch_into_frame_timeout(&self, by: &By, timeout: Duration) -> Result<()> {
        let element = self.resolve(by, &Condition::present(), timeout).await?;
        debug!(selector = %by, element = %element, "Switching into frame");
        self.session().switch_to_frame(&element).await
    }

    /// Restores the session context to the top-level document.
    pub async fn switch_to_default_content(&self) -> Result<()> {
        debug!("Switching to default content");
        self.session().switch_to_default_content().await
    }
}

// ============================================================================
// Tests
// ============================================================================
