//! Option selection for dropdown-like controls.
//!
//! Exactly one discriminator per call: visible label, underlying value,
//! or ordinal index. The discriminators are separate operations rather
//! than optional parameters, so combining them cannot be expressed.

use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::locator::By;
use crate::script;
use crate::wait::Condition;

use super::Interactor;

// ============================================================================
// Interactor - Selection
// ============================================================================

impl Interactor {
    /// Selects the option whose trimmed visible label matches.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when no option carries the label.
    pub async fn select_by_visible_text(&self, by: &By, text: &str) -> Result<()> {
        self.select_by_visible_text_timeout(by, text, self.default_timeout())
            .await
    }

    /// Label selection with an explicit resolution timeout.
    pub async fn select_by_visible_text_timeout(
        &self,
        by: &By,
        text: &str,
        timeout: Duration,
    ) -> Result<()> {
        let element = self.resolve(by, &Condition::visible(), timeout).await?;
        debug!(selector = %by, label = text, "Selecting option by label");
        if script::select_by_text(self.session(), &element, text).await? {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!(
                "no option with visible text {text:?} under {by}"
            )))
        }
    }

    /// Selects the option whose underlying value matches.
    pub async fn select_by_value(&self, by: &By, value: &str) -> Result<()> {
        self.select_by_value_timeout(by, value, self.default_timeout())
            .await
    }

    /// Value selection with an explicit resolution timeout.
    pub async fn select_by_value_timeout(
        &self,
        by: &By,
        value: &str,
        timeout: Duration,
    ) -> Result<()> {
        let element = self.resolve(by, &Condition::visible(), timeout).await?;
        debug!(selector = %by, value, "Selecting option by value");
        if script::select_by_value(self.session(), &element, value).await? {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!(
                "no option with value {value:?} under {by}"
            )))
        }
    }

    /// Selects the option at the ordinal index.
    pub async fn select_by_index(&self, by: &By, index: usize) -> Result<()> {
        self.select_by_index_timeout(by, index, self.default_timeout())
            .await
    }

    /// Index selection with an explicit resolution timeout.
    pub async fn select_by_index_timeout(
        &self,
        by: &By,
        index: usize,
        timeout: Duration,
    ) -> Result<()> {
        let element = self.resolve(by, &Condition::visible(), timeout).await?;
        debug!(selector = %by, index, "Selecting option by index");
        if script::select_by_index(self.session(), &element, index).await? {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!(
                "no option at index {index} under {by}"
            )))
        }
    }

    /// Returns the trimmed label of every option under the element.
    pub async fn get_all_option_texts(&self, by: &By) -> Result<Vec<String>> {
        self.get_all_option_texts_timeout(by, self.default_timeout())
            .await
    }

    /// Option listing with an explicit resolution timeout.
    pub async fn get_all_option_texts_timeout(
        &self,
        by: &By,
        timeout: Duration,
    ) -> Result<Vec<String>> {
        let element = self.resolve(by, &Condition::visible(), timeout).await?;
        script::option_texts(self.session(), &element).await
    }
}

// ============================================================================
// Tests
// ============================================================================
