//! Element reads and boolean state probes.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::locator::By;
use crate::script;
use crate::wait::Condition;

use super::Interactor;

// ============================================================================
// Interactor - Text Reads
// ============================================================================

impl Interactor {
    /// Returns the element's trimmed text.
    ///
    /// In debug mode the element is highlighted before reading.
    pub async fn get_text(&self, by: &By) -> Result<String> {
        self.get_text_timeout(by, self.default_timeout()).await
    }

    /// Text read with an explicit resolution timeout.
    pub async fn get_text_timeout(&self, by: &By, timeout: Duration) -> Result<String> {
        let element = self.resolve(by, &Condition::visible(), timeout).await?;
        if self.is_debug() {
            script::highlight(self.session(), &element, self.inner.config.highlight_pause).await?;
        }
        let text = self.session().get_text(&element).await?;
        Ok(text.trim().to_string())
    }

    /// Returns the trimmed text of every visible match.
    pub async fn get_all_texts(&self, by: &By) -> Result<Vec<String>> {
        self.get_all_texts_timeout(by, self.default_timeout()).await
    }

    /// Multi-element text read with an explicit resolution timeout.
    pub async fn get_all_texts_timeout(&self, by: &By, timeout: Duration) -> Result<Vec<String>> {
        let elements = self.resolve_all(by, &Condition::visible(), timeout).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in &elements {
            if self.is_debug() {
                script::highlight(self.session(), element, self.inner.config.highlight_pause)
                    .await?;
            }
            let text = self.session().get_text(element).await?;
            texts.push(text.trim().to_string());
        }
        Ok(texts)
    }
}

// ============================================================================
// Interactor - Attribute and Property Reads
// ============================================================================

impl Interactor {
    /// Returns the field's current value.
    ///
    /// Reads the live `value` DOM property; a field with no value yields
    /// an empty string.
    pub async fn get_value(&self, by: &By) -> Result<String> {
        self.get_value_timeout(by, self.default_timeout()).await
    }

    /// Value read with an explicit resolution timeout.
    pub async fn get_value_timeout(&self, by: &By, timeout: Duration) -> Result<String> {
        let element = self.resolve(by, &Condition::present(), timeout).await?;
        let value = self.session().get_property(&element, "value").await?;
        Ok(match value {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        })
    }

    /// Returns the element's attribute, if set.
    pub async fn get_attribute(&self, by: &By, name: &str) -> Result<Option<String>> {
        self.get_attribute_timeout(by, name, self.default_timeout())
            .await
    }

    /// Attribute read with an explicit resolution timeout.
    pub async fn get_attribute_timeout(
        &self,
        by: &By,
        name: &str,
        timeout: Duration,
    ) -> Result<Option<String>> {
        let element = self.resolve(by, &Condition::present(), timeout).await?;
        self.session().get_attribute(&element, name).await
    }

    /// Returns the element's live DOM property, if present.
    pub async fn get_dom_property(&self, by: &By, name: &str) -> Result<Option<Value>> {
        self.get_dom_property_timeout(by, name, self.default_timeout())
            .await
    }

    /// Property read with an explicit resolution timeout.
    pub async fn get_dom_property_timeout(
        &self,
        by: &By,
        name: &str,
        timeout: Duration,
    ) -> Result<Option<Value>> {
        let element = self.resolve(by, &Condition::present(), timeout).await?;
        self.session().get_property(&element, name).await
    }
}

// ============================================================================
// Interactor - Boolean Probes
// ============================================================================

/// The probes below never raise. Probes feed conditional test logic, so
/// any failure (absence, timeout, staleness) reports as `false`.
impl Interactor {
    /// Whether the element exists and reports enabled.
    pub async fn is_enabled(&self, by: &By) -> bool {
        self.is_enabled_timeout(by, self.default_timeout()).await
    }

    /// Enabled probe with an explicit resolution timeout.
    pub async fn is_enabled_timeout(&self, by: &By, timeout: Duration) -> bool {
        match self.probe_enabled(by, timeout).await {
            Ok(flag) => flag,
            Err(err) => {
                debug!(selector = %by, error = %err, "Enabled probe failed, reporting false");
                false
            }
        }
    }

    /// Whether the element exists and is displayed.
    pub async fn is_displayed(&self, by: &By) -> bool {
        self.is_displayed_timeout(by, self.default_timeout()).await
    }

    /// Displayed probe with an explicit resolution timeout.
    pub async fn is_displayed_timeout(&self, by: &By, timeout: Duration) -> bool {
        match self.probe_displayed(by, timeout).await {
            Ok(flag) => flag,
            Err(err) => {
                debug!(selector = %by, error = %err, "Displayed probe failed, reporting false");
                false
            }
        }
    }

    /// Whether the element exists and is selected.
    pub async fn is_selected(&self, by: &By) -> bool {
        self.is_selected_timeout(by, self.default_timeout()).await
    }

    /// Selected probe with an explicit resolution timeout.
    pub async fn is_selected_timeout(&self, by: &By, timeout: Duration) -> bool {
        match self.probe_selected(by, timeout).await {
            Ok(flag) => flag,
            Err(err) => {
                debug!(selector = %by, error = %err, "Selected probe failed, reporting false");
                false
            }
        }
    }

    async fn probe_enabled(&self, by: &By, timeout: Duration) -> Result<bool> {
        let element = self.resolve(by, &Condition::present(), timeout).await?;
        self.session().is_enabled(&element).await
    }

    async fn probe_displayed(&self, by: &By, timeout: Duration) -> Result<bool> {
        let element = self.resolve(by, &Condition::present(), timeout).await?;
        self.session().is_displayed(&element).await
    }

    async fn probe_selected(&self, by: &By, timeout: Duration) -> Result<bool> {
        let element = self.resolve(by, &Condition::present(), timeout).await?;
        self.session().is_selected(&element).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::config::InteractorConfig;
    use crate::error::Error;
    use crate::mock::MockSession;

    fn fast() -> InteractorConfig {
        InteractorConfig::new()
            .with_wait_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(100))
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_text_trims() {
        let session = MockSession::new();
        session.add_element(".flash", |e| e.with_text("  Welcome back  \n"));
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let text = interactor.get_text(&By::css(".flash")).await.unwrap();
        assert_eq!(text, "Welcome back");
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_text_highlights_in_debug_mode() {
        let session = MockSession::new();
        session.add_element(".flash", |e| e.with_text("hi"));
        let config = fast().with_debug();
        let interactor = Interactor::with_config(session.clone(), config).unwrap();

        interactor.get_text(&By::css(".flash")).await.unwrap();
        assert_eq!(session.scripts_matching("3px solid red").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_text_skips_highlight_outside_debug() {
        let session = MockSession::new();
        session.add_element(".flash", |e| e.with_text("hi"));
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        interactor.get_text(&By::css(".flash")).await.unwrap();
        assert!(session.scripts_matching("3px solid red").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_all_texts_covers_every_match() {
        let session = MockSession::new();
        session.add_element("li.item", |e| e.with_text(" one "));
        session.add_element("li.item", |e| e.with_text("two"));
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let texts = interactor.get_all_texts(&By::css("li.item")).await.unwrap();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_value_reads_live_property() {
        let session = MockSession::new();
        session.add_element("#name", |e| e.with_value("draft"));
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let value = interactor.get_value(&By::css("#name")).await.unwrap();
        assert_eq!(value, "draft");
    }

    #[tokio::test(start_paused = true)]
    async fn test_attribute_and_property_reads() {
        let session = MockSession::new();
        session.add_element("#upload", |e| {
            e.with_attribute("type", "file")
                .with_property("multiple", json!(true))
        });
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let by = By::css("#upload");
        assert_eq!(
            interactor.get_attribute(&by, "type").await.unwrap(),
            Some("file".to_string())
        );
        assert_eq!(interactor.get_attribute(&by, "accept").await.unwrap(), None);
        assert_eq!(
            interactor.get_dom_property(&by, "multiple").await.unwrap(),
            Some(json!(true))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_probes_report_element_state() {
        let session = MockSession::new();
        session.add_element("#check", |e| e.selected(true).enabled(false));
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let by = By::css("#check");
        assert!(interactor.is_selected(&by).await);
        assert!(interactor.is_displayed(&by).await);
        assert!(!interactor.is_enabled(&by).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probes_report_false_on_any_failure() {
        let session = MockSession::new();
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let ghost = By::css("#ghost");
        let short = Duration::from_millis(200);
        assert!(!interactor.is_enabled_timeout(&ghost, short).await);
        assert!(!interactor.is_displayed_timeout(&ghost, short).await);
        assert!(!interactor.is_selected_timeout(&ghost, short).await);

        // Staleness mid-probe reports false as well.
        let handle = session.add_element("#flaky", |e| e);
        session.invalidate_on_next_probe(&handle);
        assert!(!interactor.is_enabled(&By::css("#flaky")).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_text_missing_element_raises() {
        let session = MockSession::new();
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let err = interactor
            .get_text_timeout(&By::css("#ghost"), Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
