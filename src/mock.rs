//! Scriptable in-memory session double.
//!
//! [`MockSession`] implements the [`Session`] boundary against a small
//! in-memory DOM, so waiting and retry semantics can be exercised without a
//! browser. Elements are registered per selector with explicit state
//! (visibility, enablement, attributes, text) and optional schedules:
//! appear after N queries, report disabled for the first N checks, go stale
//! on the next probe, fail the first N clicks as stale.
//!
//! Every call is recorded. Tests assert on the log to verify poll counts,
//! retry counts, and which fallback path ran.
//!
//! # Example
//!
//! ```ignore
//! use webdriver_interactor::mock::MockSession;
//!
//! let session = MockSession::new();
//! session.add_element("#submit", |e| e.visible(true).enabled_after_checks(3));
//! session.set_url("https://shop.example/cart");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::locator::By;
use crate::session::{ElementHandle, ScriptArg, Session};

// ============================================================================
// Call Log
// ============================================================================

/// One recorded session call.
///
/// Element operations carry the handle id; queries carry the selector
/// value.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCall {
    /// `find_element(selector)`
    FindElement(String),
    /// `find_elements(selector)`
    FindElements(String),
    /// `click(element)`
    Click(String),
    /// `send_keys(element, text)`
    SendKeys(String, String),
    /// `clear(element)`
    Clear(String),
    /// `get_text(element)`
    GetText(String),
    /// `get_tag_name(element)`
    GetTagName(String),
    /// `get_attribute(element, name)`
    GetAttribute(String, String),
    /// `get_property(element, name)`
    GetProperty(String, String),
    /// `is_enabled(element)`
    IsEnabled(String),
    /// `is_selected(element)`
    IsSelected(String),
    /// `is_displayed(element)`
    IsDisplayed(String),
    /// `current_url()`
    CurrentUrl,
    /// `get_title()`
    GetTitle,
    /// `switch_to_frame(element)`
    SwitchToFrame(String),
    /// `switch_to_default_content()`
    SwitchToDefaultContent,
    /// `execute_script(..)`
    ExecuteScript(String),
}

/// One recorded script execution with its arguments.
#[derive(Debug, Clone)]
pub struct ScriptCall {
    /// The script body.
    pub script: String,
    /// The arguments passed alongside.
    pub args: Vec<ScriptArg>,
}

// ============================================================================
// Mock Element
// ============================================================================

#[derive(Debug, Clone)]
struct MockElement {
    id: String,
    selector: String,
    visible: bool,
    enabled: bool,
    selected: bool,
    tag: String,
    text: String,
    value: String,
    attributes: FxHashMap<String, String>,
    properties: FxHashMap<String, Value>,
    stale: bool,
    stale_on_next_probe: bool,
    appear_after_finds: u32,
    disabled_checks_remaining: u32,
    stale_clicks_remaining: u32,
    click_failure: Option<String>,
    enabled_checks_seen: u32,
}

impl MockElement {
    fn new(selector: &str) -> Self {
        Self {
            id: format!("e-{}", Uuid::new_v4()),
            selector: selector.to_string(),
            visible: true,
            enabled: true,
            selected: false,
            tag: "div".to_string(),
            text: String::new(),
            value: String::new(),
            attributes: FxHashMap::default(),
            properties: FxHashMap::default(),
            stale: false,
            stale_on_next_probe: false,
            appear_after_finds: 0,
            disabled_checks_remaining: 0,
            stale_clicks_remaining: 0,
            click_failure: None,
            enabled_checks_seen: 0,
        }
    }
}

// ============================================================================
// Element Builder
// ============================================================================

/// Chainable state setup for a registered element.
///
/// Defaults mirror a plain rendered element: visible, enabled, not
/// selected, tag `div`, empty text and value.
#[derive(Debug)]
pub struct MockElementBuilder {
    element: MockElement,
}

impl MockElementBuilder {
    /// Sets visibility.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.element.visible = visible;
        self
    }

    /// Sets enablement.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.element.enabled = enabled;
        self
    }

    /// Sets selection state.
    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.element.selected = selected;
        self
    }

    /// Sets the tag name.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.element.tag = tag.into();
        self
    }

    /// Sets the rendered text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.element.text = text.into();
        self
    }

    /// Sets the editable value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.element.value = value.into();
        self
    }

    /// Sets an HTML attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.element.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets a DOM property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.element.properties.insert(name.into(), value);
        self
    }

    /// Reports disabled for the first `n` enablement checks, enabled
    /// afterwards.
    #[must_use]
    pub fn enabled_after_checks(mut self, n: u32) -> Self {
        self.element.disabled_checks_remaining = n;
        self
    }

    /// Fails the first `n` clicks with a stale-element error.
    #[must_use]
    pub fn stale_first_clicks(mut self, n: u32) -> Self {
        self.element.stale_clicks_remaining = n;
        self
    }

    /// Fails every click with a session error carrying the message.
    #[must_use]
    pub fn click_fails(mut self, message: impl Into<String>) -> Self {
        self.element.click_failure = Some(message.into());
        self
    }
}

// ============================================================================
// Mock State
// ============================================================================

#[derive(Debug, Default)]
struct MockState {
    elements: Vec<MockElement>,
    finds: FxHashMap<String, u32>,
    calls: Vec<SessionCall>,
    script_calls: Vec<ScriptCall>,
    script_queue: Vec<Value>,
    script_responders: Vec<(String, Value)>,
    url: String,
    title: String,
    ready_state: String,
    frame_stack: Vec<String>,
}

impl MockState {
    fn element(&self, id: &str) -> Result<&MockElement> {
        self.elements
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::stale_element(id))
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut MockElement> {
        self.elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::stale_element(id))
    }

    /// Staleness gate shared by every per-element operation.
    fn probe(&mut self, id: &str) -> Result<()> {
        let element = self.element_mut(id)?;
        if element.stale_on_next_probe {
            element.stale_on_next_probe = false;
            element.stale = true;
        }
        if element.stale {
            return Err(Error::stale_element(id));
        }
        Ok(())
    }
}

// ============================================================================
// MockSession
// ============================================================================

/// In-memory [`Session`] implementation for tests, benches, and examples.
///
/// Cheap to clone; clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MockSession {
    state: Arc<Mutex<MockState>>,
}

impl MockSession {
    /// Creates an empty session with a blank document.
    #[must_use]
    pub fn new() -> Self {
        let session = Self::default();
        {
            let mut state = session.state.lock();
            state.ready_state = "complete".to_string();
        }
        session
    }

    // ------------------------------------------------------------------------
    // DOM setup
    // ------------------------------------------------------------------------

    /// Registers an element under a selector value and returns its handle.
    pub fn add_element<F>(&self, selector: &str, configure: F) -> ElementHandle
    where
        F: FnOnce(MockElementBuilder) -> MockElementBuilder,
    {
        let builder = configure(MockElementBuilder {
            element: MockElement::new(selector),
        });
        let handle = ElementHandle::new(builder.element.id.clone());
        self.state.lock().elements.push(builder.element);
        handle
    }

    /// Registers an element that only matches queries after the selector
    /// has been queried `finds` times.
    pub fn add_element_after_finds<F>(
        &self,
        selector: &str,
        finds: u32,
        configure: F,
    ) -> ElementHandle
    where
        F: FnOnce(MockElementBuilder) -> MockElementBuilder,
    {
        let mut builder = configure(MockElementBuilder {
            element: MockElement::new(selector),
        });
        builder.element.appear_after_finds = finds;
        let handle = ElementHandle::new(builder.element.id.clone());
        self.state.lock().elements.push(builder.element);
        handle
    }

    /// Marks the element stale; queries stop matching it and element
    /// operations fail with a stale error.
    pub fn invalidate(&self, handle: &ElementHandle) {
        let mut state = self.state.lock();
        if let Ok(element) = state.element_mut(handle.id()) {
            element.stale = true;
        }
    }

    /// Makes the next element operation on the handle fail stale; the
    /// element stays stale afterwards.
    pub fn invalidate_on_next_probe(&self, handle: &ElementHandle) {
        let mut state = self.state.lock();
        if let Ok(element) = state.element_mut(handle.id()) {
            element.stale_on_next_probe = true;
        }
    }

    /// Sets the document URL.
    pub fn set_url(&self, url: impl Into<String>) {
        self.state.lock().url = url.into();
    }

    /// Sets the document title.
    pub fn set_title(&self, title: impl Into<String>) {
        self.state.lock().title = title.into();
    }

    /// Sets `document.readyState`.
    pub fn set_ready_state(&self, ready_state: impl Into<String>) {
        self.state.lock().ready_state = ready_state.into();
    }

    // ------------------------------------------------------------------------
    // Script programming
    // ------------------------------------------------------------------------

    /// Queues a result consumed by the next script execution, ahead of any
    /// substring responder.
    pub fn push_script_result(&self, value: Value) {
        self.state.lock().script_queue.push(value);
    }

    /// Returns `value` for every executed script whose body contains
    /// `fragment`. Responders match in registration order.
    pub fn set_script_result_for(&self, fragment: impl Into<String>, value: Value) {
        self.state
            .lock()
            .script_responders
            .push((fragment.into(), value));
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// Number of find queries issued for a selector value.
    #[must_use]
    pub fn find_count(&self, selector: &str) -> u32 {
        self.state.lock().finds.get(selector).copied().unwrap_or(0)
    }

    /// Total find queries across all selectors.
    #[must_use]
    pub fn total_finds(&self) -> u32 {
        self.state.lock().finds.values().sum()
    }

    /// Full call log, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<SessionCall> {
        self.state.lock().calls.clone()
    }

    /// Script executions, in order.
    #[must_use]
    pub fn script_calls(&self) -> Vec<ScriptCall> {
        self.state.lock().script_calls.clone()
    }

    /// Script executions whose body contains the fragment.
    #[must_use]
    pub fn scripts_matching(&self, fragment: &str) -> Vec<ScriptCall> {
        self.state
            .lock()
            .script_calls
            .iter()
            .filter(|call| call.script.contains(fragment))
            .cloned()
            .collect()
    }

    /// Whether any element operation ran against the handle.
    #[must_use]
    pub fn was_probed(&self, handle: &ElementHandle) -> bool {
        let id = handle.id();
        self.state.lock().calls.iter().any(|call| {
            matches!(
                call,
                SessionCall::Click(i)
                | SessionCall::SendKeys(i, _)
                | SessionCall::Clear(i)
                | SessionCall::GetText(i)
                | SessionCall::GetTagName(i)
                | SessionCall::GetAttribute(i, _)
                | SessionCall::GetProperty(i, _)
                | SessionCall::IsEnabled(i)
                | SessionCall::IsSelected(i)
                | SessionCall::IsDisplayed(i)
                | SessionCall::SwitchToFrame(i)
                if i.as_str() == id
            )
        })
    }

    /// Native clicks recorded against the handle, including failed ones.
    #[must_use]
    pub fn click_count(&self, handle: &ElementHandle) -> u32 {
        let id = handle.id();
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, SessionCall::Click(i) if i.as_str() == id))
            .count() as u32
    }

    /// Enablement checks recorded against the handle.
    #[must_use]
    pub fn enabled_check_count(&self, handle: &ElementHandle) -> u32 {
        self.state
            .lock()
            .element(handle.id())
            .map(|e| e.enabled_checks_seen)
            .unwrap_or(0)
    }

    /// Current editable value of the element.
    #[must_use]
    pub fn value_of(&self, handle: &ElementHandle) -> String {
        self.state
            .lock()
            .element(handle.id())
            .map(|e| e.value.clone())
            .unwrap_or_default()
    }

    /// Frame context as a stack of frame-element ids, innermost last.
    #[must_use]
    pub fn frame_stack(&self) -> Vec<String> {
        self.state.lock().frame_stack.clone()
    }
}

// ============================================================================
// Session Implementation
// ============================================================================

#[async_trait]
impl Session for MockSession {
    async fn execute_script(&self, script: &str, args: &[ScriptArg]) -> Result<Value> {
        let mut state = self.state.lock();
        state
            .calls
            .push(SessionCall::ExecuteScript(script.to_string()));
        state.script_calls.push(ScriptCall {
            script: script.to_string(),
            args: args.to_vec(),
        });

        // Element arguments must still be live.
        for arg in args {
            if let ScriptArg::Element(handle) = arg {
                state.probe(handle.id())?;
            }
        }

        // The upload planter's side effect: the planted input becomes
        // findable under its marker id.
        if script.contains("input.id = markerId") {
            let multiple = matches!(args.get(1), Some(ScriptArg::Value(Value::Bool(true))));
            if let Some(ScriptArg::Value(Value::String(marker))) = args.get(2) {
                let mut input = MockElement::new(marker);
                input.tag = "input".to_string();
                input
                    .attributes
                    .insert("type".to_string(), "file".to_string());
                if multiple {
                    input
                        .properties
                        .insert("multiple".to_string(), Value::Bool(true));
                }
                state.elements.push(input);
            }
        }

        if !state.script_queue.is_empty() {
            return Ok(state.script_queue.remove(0));
        }
        for (fragment, value) in &state.script_responders {
            if script.contains(fragment.as_str()) {
                return Ok(value.clone());
            }
        }
        if script.contains("document.readyState") {
            return Ok(Value::String(state.ready_state.clone()));
        }
        Ok(Value::Null)
    }

    async fn find_element(&self, by: &By) -> Result<Option<ElementHandle>> {
        let mut state = self.state.lock();
        let selector = by.value().to_string();
        state.calls.push(SessionCall::FindElement(selector.clone()));
        let count = state.finds.entry(selector.clone()).or_insert(0);
        *count += 1;
        let seen = *count;

        Ok(state
            .elements
            .iter()
            .find(|e| e.selector == selector && !e.stale && seen > e.appear_after_finds)
            .map(|e| ElementHandle::new(e.id.clone())))
    }

    async fn find_elements(&self, by: &By) -> Result<Vec<ElementHandle>> {
        let mut state = self.state.lock();
        let selector = by.value().to_string();
        state
            .calls
            .push(SessionCall::FindElements(selector.clone()));
        let count = state.finds.entry(selector.clone()).or_insert(0);
        *count += 1;
        let seen = *count;

        Ok(state
            .elements
            .iter()
            .filter(|e| e.selector == selector && !e.stale && seen > e.appear_after_finds)
            .map(|e| ElementHandle::new(e.id.clone()))
            .collect())
    }

    async fn click(&self, element: &ElementHandle) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::Click(element.id().to_string()));
        state.probe(element.id())?;
        let target = state.element_mut(element.id())?;
        if target.stale_clicks_remaining > 0 {
            target.stale_clicks_remaining -= 1;
            return Err(Error::stale_element(element.id()));
        }
        if let Some(message) = &target.click_failure {
            return Err(Error::session(message.clone()));
        }
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<()> {
        let mut state = self.state.lock();
        state
            .calls
            .push(SessionCall::SendKeys(element.id().to_string(), text.to_string()));
        state.probe(element.id())?;
        state.element_mut(element.id())?.value.push_str(text);
        Ok(())
    }

    async fn clear(&self, element: &ElementHandle) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::Clear(element.id().to_string()));
        state.probe(element.id())?;
        state.element_mut(element.id())?.value.clear();
        Ok(())
    }

    async fn get_text(&self, element: &ElementHandle) -> Result<String> {
        let mut state = self.state.lock();
        state
            .calls
            .push(SessionCall::GetText(element.id().to_string()));
        state.probe(element.id())?;
        Ok(state.element(element.id())?.text.clone())
    }

    async fn get_tag_name(&self, element: &ElementHandle) -> Result<String> {
        let mut state = self.state.lock();
        state
            .calls
            .push(SessionCall::GetTagName(element.id().to_string()));
        state.probe(element.id())?;
        Ok(state.element(element.id())?.tag.clone())
    }

    async fn get_attribute(&self, element: &ElementHandle, name: &str) -> Result<Option<String>> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::GetAttribute(
            element.id().to_string(),
            name.to_string(),
        ));
        state.probe(element.id())?;
        Ok(state.element(element.id())?.attributes.get(name).cloned())
    }

    async fn get_property(&self, element: &ElementHandle, name: &str) -> Result<Option<Value>> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::GetProperty(
            element.id().to_string(),
            name.to_string(),
        ));
        state.probe(element.id())?;
        let target = state.element(element.id())?;
        if let Some(value) = target.properties.get(name) {
            return Ok(Some(value.clone()));
        }
        if name == "value" {
            return Ok(Some(Value::String(target.value.clone())));
        }
        Ok(None)
    }

    async fn is_enabled(&self, element: &ElementHandle) -> Result<bool> {
        let mut state = self.state.lock();
        state
            .calls
            .push(SessionCall::IsEnabled(element.id().to_string()));
        state.probe(element.id())?;
        let target = state.element_mut(element.id())?;
        target.enabled_checks_seen += 1;
        if target.disabled_checks_remaining > 0 {
            target.disabled_checks_remaining -= 1;
            return Ok(false);
        }
        Ok(target.enabled)
    }

    async fn is_selected(&self, element: &ElementHandle) -> Result<bool> {
        let mut state = self.state.lock();
        state
            .calls
            .push(SessionCall::IsSelected(element.id().to_string()));
        state.probe(element.id())?;
        Ok(state.element(element.id())?.selected)
    }

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool> {
        let mut state = self.state.lock();
        state
            .calls
            .push(SessionCall::IsDisplayed(element.id().to_string()));
        state.probe(element.id())?;
        Ok(state.element(element.id())?.visible)
    }

    async fn current_url(&self) -> Result<String> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::CurrentUrl);
        Ok(state.url.clone())
    }

    async fn get_title(&self) -> Result<String> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::GetTitle);
        Ok(state.title.clone())
    }

    async fn switch_to_frame(&self, element: &ElementHandle) -> Result<()> {
        let mut state = self.state.lock();
        state
            .calls
            .push(SessionCall::SwitchToFrame(element.id().to_string()));
        state.probe(element.id())?;
        let id = element.id().to_string();
        state.frame_stack.push(id);
        Ok(())
    }

    async fn switch_to_default_content(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::SwitchToDefaultContent);
        state.frame_stack.clear();
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_respects_selector_and_order() {
        let session = MockSession::new();
        let first = session.add_element(".row", |e| e);
        let _other = session.add_element("#banner", |e| e);
        let second = session.add_element(".row", |e| e);

        let found = session.find_elements(&By::css(".row")).await.unwrap();
        assert_eq!(found, vec![first.clone(), second]);

        let single = session.find_element(&By::css(".row")).await.unwrap();
        assert_eq!(single, Some(first));
        assert_eq!(session.find_count(".row"), 2);
    }

    #[tokio::test]
    async fn test_appear_after_finds() {
        let session = MockSession::new();
        session.add_element_after_finds("#late", 2, |e| e);

        assert!(session.find_element(&By::css("#late")).await.unwrap().is_none());
        assert!(session.find_element(&By::css("#late")).await.unwrap().is_none());
        assert!(session.find_element(&By::css("#late")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_stale_element_errors() {
        let session = MockSession::new();
        let handle = session.add_element("#gone", |e| e);
        session.invalidate(&handle);

        let err = session.get_text(&handle).await.unwrap_err();
        assert!(err.is_stale());
        assert!(session.find_element(&By::css("#gone")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stale_on_next_probe_fires_once_then_sticks() {
        let session = MockSession::new();
        let handle = session.add_element("#flaky", |e| e);
        session.invalidate_on_next_probe(&handle);

        assert!(session.is_displayed(&handle).await.unwrap_err().is_stale());
        // Stays stale afterwards.
        assert!(session.is_displayed(&handle).await.unwrap_err().is_stale());
    }

    #[tokio::test]
    async fn test_enabled_schedule() {
        let session = MockSession::new();
        let handle = session.add_element("#btn", |e| e.enabled_after_checks(2));

        assert!(!session.is_enabled(&handle).await.unwrap());
        assert!(!session.is_enabled(&handle).await.unwrap());
        assert!(session.is_enabled(&handle).await.unwrap());
        assert_eq!(session.enabled_check_count(&handle), 3);
    }

    #[tokio::test]
    async fn test_stale_first_clicks_schedule() {
        let session = MockSession::new();
        let handle = session.add_element("#btn", |e| e.stale_first_clicks(2));

        assert!(session.click(&handle).await.unwrap_err().is_stale());
        assert!(session.click(&handle).await.unwrap_err().is_stale());
        session.click(&handle).await.unwrap();
        assert_eq!(session.click_count(&handle), 3);
    }

    #[tokio::test]
    async fn test_click_failure_is_not_stale() {
        let session = MockSession::new();
        let handle = session.add_element("#btn", |e| e.click_fails("intercepted by overlay"));

        let err = session.click(&handle).await.unwrap_err();
        assert!(!err.is_stale());
        assert!(matches!(err, Error::Session { .. }));
    }

    #[tokio::test]
    async fn test_value_tracks_clear_and_send_keys() {
        let session = MockSession::new();
        let handle = session.add_element("#field", |e| e.with_value("old"));

        session.send_keys(&handle, "er").await.unwrap();
        assert_eq!(session.value_of(&handle), "older");

        session.clear(&handle).await.unwrap();
        session.send_keys(&handle, "new").await.unwrap();
        assert_eq!(session.value_of(&handle), "new");

        let value = session.get_property(&handle, "value").await.unwrap();
        assert_eq!(value, Some(Value::String("new".to_string())));
    }

    #[tokio::test]
    async fn test_script_queue_then_responders_then_ready_state() {
        let session = MockSession::new();
        session.set_ready_state("interactive");
        session.set_script_result_for("scrollTo", Value::Bool(true));
        session.push_script_result(Value::from(7));

        // Queue first.
        let v = session.execute_script("return 1 + 1", &[]).await.unwrap();
        assert_eq!(v, Value::from(7));
        // Then substring responders.
        let v = session
            .execute_script("window.scrollTo(0, 100)", &[])
            .await
            .unwrap();
        assert_eq!(v, Value::Bool(true));
        // Built-in readyState fallback.
        let v = session
            .execute_script("return document.readyState", &[])
            .await
            .unwrap();
        assert_eq!(v, Value::String("interactive".to_string()));
        // Otherwise null.
        let v = session.execute_script("return undefined", &[]).await.unwrap();
        assert_eq!(v, Value::Null);
    }

    #[tokio::test]
    async fn test_script_with_stale_element_arg_fails() {
        let session = MockSession::new();
        let handle = session.add_element("#target", |e| e);
        session.invalidate(&handle);

        let err = session
            .execute_script("arguments[0].click()", &[ScriptArg::Element(handle)])
            .await
            .unwrap_err();
        assert!(err.is_stale());
    }

    #[tokio::test]
    async fn test_frame_stack() {
        let session = MockSession::new();
        let outer = session.add_element("iframe#outer", |e| e.with_tag("iframe"));
        let inner = session.add_element("iframe#inner", |e| e.with_tag("iframe"));

        session.switch_to_frame(&outer).await.unwrap();
        session.switch_to_frame(&inner).await.unwrap();
        assert_eq!(
            session.frame_stack(),
            vec![outer.id().to_string(), inner.id().to_string()]
        );

        session.switch_to_default_content().await.unwrap();
        assert!(session.frame_stack().is_empty());
    }

    #[tokio::test]
    async fn test_call_log_records_probes() {
        let session = MockSession::new();
        let handle = session.add_element("#x", |e| e);

        assert!(!session.was_probed(&handle));
        session.is_displayed(&handle).await.unwrap();
        assert!(session.was_probed(&handle));

        let calls = session.calls();
        assert!(calls.contains(&SessionCall::IsDisplayed(handle.id().to_string())));
    }
}
