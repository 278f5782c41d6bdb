//! Browser session boundary.
//!
//! The interaction core drives a browser through [`Session`], an abstract
//! WebDriver-style surface the embedding stack implements (a real driver
//! binding in production, [`MockSession`](crate::mock::MockSession) in
//! tests). The core never talks to a wire protocol itself.
//!
//! # Contract
//!
//! - [`Session::find_element`] returns `Ok(None)` when nothing matches;
//!   absence at the boundary is not an error. The resolver turns persistent
//!   absence into [`Error::NotFound`](crate::Error::NotFound).
//! - Per-element operations on a handle invalidated by a re-render return
//!   [`Error::StaleElement`](crate::Error::StaleElement).
//! - Element handles are opaque, session-scoped, and short-lived; they must
//!   never be cached across navigations.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::locator::By;

// ============================================================================
// ElementHandle
// ============================================================================

/// Opaque reference to a live DOM node, scoped to the session that
/// produced it.
///
/// Becomes stale whenever the page re-renders the node; stale handles are
/// an expected, retryable condition for the interaction engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(String);

impl ElementHandle {
    /// Creates a handle from a session-scoped id.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the session-scoped id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ScriptArg
// ============================================================================

/// Argument passed to injected script execution.
///
/// Scripts reference arguments positionally as `arguments[0]`,
/// `arguments[1]`, and so on. Element arguments arrive in the page as the
/// live DOM node behind the handle.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptArg {
    /// A plain JSON value.
    Value(Value),
    /// A resolved element, materialized as its DOM node in the page.
    Element(ElementHandle),
}

impl From<Value> for ScriptArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&ElementHandle> for ScriptArg {
    fn from(element: &ElementHandle) -> Self {
        Self::Element(element.clone())
    }
}

impl From<ElementHandle> for ScriptArg {
    fn from(element: ElementHandle) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for ScriptArg {
    fn from(s: &str) -> Self {
        Self::Value(Value::String(s.to_string()))
    }
}

// ============================================================================
// Session Trait
// ============================================================================

/// WebDriver-style browser session surface consumed by the interaction
/// core.
///
/// Implementations own the wire protocol, the element-handle registry, and
/// the frame context. All methods here are single-shot; waiting and
/// retrying live entirely in the core.
#[async_trait]
pub trait Session: Send + Sync {
    /// Executes JavaScript in the current frame context and returns its
    /// value.
    async fn execute_script(&self, script: &str, args: &[ScriptArg]) -> Result<Value>;

    /// Finds the first element matching the locator, or `None`.
    async fn find_element(&self, by: &By) -> Result<Option<ElementHandle>>;

    /// Finds all elements matching the locator.
    async fn find_elements(&self, by: &By) -> Result<Vec<ElementHandle>>;

    /// Performs a native click on the element.
    async fn click(&self, element: &ElementHandle) -> Result<()>;

    /// Types text into the element.
    ///
    /// Appends to existing content; callers clear first for overwrite
    /// semantics.
    async fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<()>;

    /// Clears the element's editable content.
    async fn clear(&self, element: &ElementHandle) -> Result<()>;

    /// Returns the element's rendered text content.
    async fn get_text(&self, element: &ElementHandle) -> Result<String>;

    /// Returns the element's tag name, lowercased.
    async fn get_tag_name(&self, element: &ElementHandle) -> Result<String>;

    /// Returns an HTML attribute value, or `None` if absent.
    async fn get_attribute(&self, element: &ElementHandle, name: &str) -> Result<Option<String>>;

    /// Returns a DOM property value, or `None` if absent.
    async fn get_property(&self, element: &ElementHandle, name: &str) -> Result<Option<Value>>;

    /// Returns whether the element is enabled.
    async fn is_enabled(&self, element: &ElementHandle) -> Result<bool>;

    /// Returns whether the element is selected or checked.
    async fn is_selected(&self, element: &ElementHandle) -> Result<bool>;

    /// Returns whether the element is rendered visible.
    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool>;

    /// Returns the current document URL.
    async fn current_url(&self) -> Result<String>;

    /// Returns the current document title.
    async fn get_title(&self) -> Result<String>;

    /// Switches the session's frame context into the given frame element.
    ///
    /// Subsequent queries and script execution run inside that frame.
    async fn switch_to_frame(&self, element: &ElementHandle) -> Result<()>;

    /// Switches the session's frame context back to the top document.
    async fn switch_to_default_content(&self) -> Result<()>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_handle_id() {
        let handle = ElementHandle::new("e-42");
        assert_eq!(handle.id(), "e-42");
        assert_eq!(handle.to_string(), "e-42");
    }

    #[test]
    fn test_element_handle_equality() {
        let a = ElementHandle::new("e-1");
        let b = ElementHandle::new("e-1");
        let c = ElementHandle::new("e-2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_script_arg_from_value() {
        let arg: ScriptArg = serde_json::json!({"x": 1}).into();
        assert!(matches!(arg, ScriptArg::Value(_)));

        let arg: ScriptArg = "hello".into();
        assert!(matches!(arg, ScriptArg::Value(Value::String(_))));
    }

    #[test]
    fn test_script_arg_from_element() {
        let handle = ElementHandle::new("e-7");
        let arg: ScriptArg = (&handle).into();
        match arg {
            ScriptArg::Element(e) => assert_eq!(e.id(), "e-7"),
            ScriptArg::Value(_) => panic!("expected element arg"),
        }
    }
}
