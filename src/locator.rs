//! Element locator strategies.
//!
//! A locator is an immutable strategy+selector pair. It is evaluated fresh
//! on every resolution and never cached across navigations.
//!
//! # Example
//!
//! ```ignore
//! use webdriver_interactor::By;
//!
//! // CSS selector (default)
//! interactor.click(&By::css("#submit")).await?;
//!
//! // By ID
//! interactor.enter_text(&By::id("email"), "user@example.com").await?;
//!
//! // By XPath
//! interactor.click(&By::xpath("//button[@type='submit']")).await?;
//!
//! // By name attribute
//! interactor.select_by_visible_text(&By::name("country"), "Sweden").await?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// By Enum
// ============================================================================

/// Element locator strategy (like Selenium's `By`).
///
/// Covers the eight standard WebDriver strategies. The strategy and selector
/// are passed through unmodified to the session boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// CSS selector (most common).
    ///
    /// # Example
    /// ```ignore
    /// By::Css("#login-button")
    /// By::Css("button.primary")
    /// By::Css("[data-testid='submit']")
    /// ```
    #[serde(rename = "css")]
    Css(String),

    /// XPath expression.
    ///
    /// # Example
    /// ```ignore
    /// By::XPath("//button[@type='submit']")
    /// By::XPath("//div[contains(@class, 'modal')]")
    /// ```
    #[serde(rename = "xpath")]
    XPath(String),

    /// Element ID (shorthand for `#id` CSS selector).
    ///
    /// # Example
    /// ```ignore
    /// By::Id("username")  // equivalent to By::Css("#username")
    /// ```
    #[serde(rename = "id")]
    Id(String),

    /// Name attribute.
    ///
    /// # Example
    /// ```ignore
    /// By::Name("email")  // equivalent to By::Css("[name='email']")
    /// ```
    #[serde(rename = "name")]
    Name(String),

    /// Tag name.
    ///
    /// # Example
    /// ```ignore
    /// By::Tag("option")
    /// By::Tag("input")
    /// ```
    #[serde(rename = "tag")]
    Tag(String),

    /// Class name (single class).
    ///
    /// # Example
    /// ```ignore
    /// By::Class("btn-primary")  // equivalent to By::Css(".btn-primary")
    /// ```
    #[serde(rename = "class")]
    Class(String),

    /// Link text (for `<a>` elements).
    ///
    /// # Example
    /// ```ignore
    /// By::LinkText("Home")
    /// ```
    #[serde(rename = "linkText")]
    LinkText(String),

    /// Partial link text (for `<a>` elements).
    ///
    /// # Example
    /// ```ignore
    /// By::PartialLinkText("Read more")
    /// ```
    #[serde(rename = "partialLinkText")]
    PartialLinkText(String),
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a name attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Creates a link text selector.
    #[inline]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Creates a partial link text selector.
    #[inline]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// Returns the strategy name for the session boundary.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::Tag(_) => "tag",
            Self::Class(_) => "class",
            Self::LinkText(_) => "linkText",
            Self::PartialLinkText(_) => "partialLinkText",
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::Id(v)
            | Self::Name(v)
            | Self::Tag(v)
            | Self::Class(v)
            | Self::LinkText(v)
            | Self::PartialLinkText(v) => v,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for By {
    /// Formats as `strategy:selector`, the form used in error diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy(), self.value())
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_css() {
        let by = By::Css("#login".to_string());
        assert_eq!(by.strategy(), "css");
        assert_eq!(by.value(), "#login");
    }

    #[test]
    fn test_by_id() {
        let by = By::Id("username".to_string());
        assert_eq!(by.strategy(), "id");
        assert_eq!(by.value(), "username");
    }

    #[test]
    fn test_by_xpath() {
        let by = By::XPath("//button".to_string());
        assert_eq!(by.strategy(), "xpath");
        assert_eq!(by.value(), "//button");
    }

    #[test]
    fn test_display() {
        let by = By::css("#cart .total");
        assert_eq!(by.to_string(), "css:#cart .total");

        let by = By::name("quantity");
        assert_eq!(by.to_string(), "name:quantity");
    }

    #[test]
    fn test_from_str() {
        let by: By = "#login".into();
        assert!(matches!(by, By::Css(_)));
    }

    #[test]
    fn test_builder_methods() {
        assert!(matches!(By::css("#id"), By::Css(_)));
        assert!(matches!(By::xpath("//div"), By::XPath(_)));
        assert!(matches!(By::id("myid"), By::Id(_)));
        assert!(matches!(By::link_text("Home"), By::LinkText(_)));
    }

    #[test]
    fn test_serde_tagging() {
        let by = By::css("#login");
        let json = serde_json::to_value(&by).unwrap();
        assert_eq!(json["strategy"], "css");
        assert_eq!(json["value"], "#login");
    }

    proptest::proptest! {
        // The tagged JSON shape is a contract for locator files; the
        // selector string must survive untouched for every strategy.
        #[test]
        fn prop_serde_keeps_strategy_and_value(value in ".*", variant in 0usize..8) {
            let by = match variant {
                0 => By::css(value.clone()),
                1 => By::xpath(value.clone()),
                2 => By::id(value.clone()),
                3 => By::name(value.clone()),
                4 => By::tag(value.clone()),
                5 => By::class(value.clone()),
                6 => By::link_text(value.clone()),
                _ => By::partial_link_text(value.clone()),
            };

            let json = serde_json::to_value(&by).unwrap();
            proptest::prop_assert_eq!(json["strategy"].as_str(), Some(by.strategy()));
            proptest::prop_assert_eq!(json["value"].as_str(), Some(value.as_str()));

            let back: By = serde_json::from_value(json).unwrap();
            proptest::prop_assert_eq!(&back, &by);
            proptest::prop_assert_eq!(back.to_string(), format!("{}:{}", by.strategy(), value));
        }
    }
}
