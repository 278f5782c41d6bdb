//! Explicit waits: conditions and the polling resolver.
//!
//! A [`Condition`] is a stateless predicate over document or element state.
//! Conditions compose with [`Condition::and`] / [`Condition::or`] and the
//! composite is evaluated as a single wait unit: every part is checked
//! inside the same polling pass, so there is no race window between
//! separately-waited conditions.
//!
//! The resolver polls the live DOM until the condition holds or the timeout
//! elapses. Candidates are re-queried on every pass; a candidate that goes
//! stale between the query and the check is skipped for that pass, never
//! surfaced.
//!
//! # Composition semantics
//!
//! Under [`Condition::and`], element-scoped parts intersect: one candidate
//! must satisfy all of them. Collection parts (`count_*`, `all_visible`)
//! apply to the candidates surviving earlier parts, so order matters.
//! [`Condition::or`] returns the first satisfied branch.
//!
//! # Example
//!
//! ```ignore
//! use webdriver_interactor::wait::{self, Condition, WaitOptions};
//!
//! let button = wait::resolve(
//!     session.as_ref(),
//!     &By::css("#checkout"),
//!     &Condition::clickable(),
//!     WaitOptions::new(),
//! )
//! .await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use regex::Regex;
use serde_json::Value;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::config::{DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT, InteractorConfig};
use crate::error::{Error, Result};
use crate::locator::By;
use crate::session::{ElementHandle, Session};

// ============================================================================
// WaitOptions
// ============================================================================

/// Timeout and poll interval for one wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Total time to keep polling before giving up.
    pub timeout: Duration,
    /// Pause between polling passes.
    pub poll_interval: Duration,
}

impl WaitOptions {
    /// Creates options with the crate defaults (15s timeout, 500ms poll).
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the timeout.
    #[inline]
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the poll interval.
    #[inline]
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Derives options from an interactor configuration.
    #[inline]
    #[must_use]
    pub fn from_config(config: &InteractorConfig) -> Self {
        Self {
            timeout: config.wait_timeout,
            poll_interval: config.poll_interval,
        }
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Custom Predicate
// ============================================================================

/// Boxed async predicate over the session, for conditions the built-in
/// vocabulary cannot express.
pub type Predicate =
    Arc<dyn for<'a> Fn(&'a dyn Session) -> BoxFuture<'a, Result<bool>> + Send + Sync>;

// ============================================================================
// Condition
// ============================================================================

/// Predicate over document or element state, polled by the resolver.
///
/// Element-scoped conditions (`visible`, `clickable`, `text_is`, …) are
/// checked against each candidate the locator currently matches. Collection
/// conditions judge the candidate set as a whole. Document conditions
/// (`url_contains`, `title_is`, `document_ready`) ignore candidates
/// entirely and can be waited on without a locator via [`wait_for`].
#[derive(Clone)]
pub enum Condition {
    /// At least one candidate exists.
    Present,
    /// At least one candidate is rendered visible.
    Visible,
    /// At least one candidate is visible and enabled.
    Clickable,
    /// At least one candidate is enabled.
    Enabled,
    /// At least one candidate is selected or checked.
    Selected,
    /// At least one candidate's selection state equals the flag.
    SelectionIs(bool),
    /// A candidate's trimmed text equals the string.
    TextIs(String),
    /// A candidate's text matches the pattern.
    TextMatches(Regex),
    /// A candidate's attribute equals the value.
    AttributeIs {
        /// Attribute name.
        name: String,
        /// Expected value.
        value: String,
    },
    /// A candidate's attribute contains the substring.
    AttributeContains {
        /// Attribute name.
        name: String,
        /// Required substring.
        substring: String,
    },
    /// A candidate's DOM property equals the value.
    PropertyIs {
        /// Property name.
        name: String,
        /// Expected value.
        value: Value,
    },
    /// No candidate is rendered visible (vacuously true when none match).
    Invisible,
    /// A previously resolved handle no longer refers to a live node.
    Stale(ElementHandle),
    /// Exactly `n` candidates match.
    CountIs(usize),
    /// More than `n` candidates match.
    CountGreaterThan(usize),
    /// Fewer than `n` candidates match.
    CountLessThan(usize),
    /// At least one candidate matches and every one is visible.
    AllVisible,
    /// The document URL contains the substring.
    UrlContains(String),
    /// The document title equals the string.
    TitleIs(String),
    /// The document title contains the substring.
    TitleContains(String),
    /// `document.readyState` is `"complete"`.
    DocumentReady,
    /// Custom async predicate over the session.
    Custom {
        /// Human-readable description for timeout diagnostics.
        description: String,
        /// The predicate itself.
        predicate: Predicate,
    },
    /// Every part holds within the same polling pass.
    And(Vec<Condition>),
    /// Any part holds; the first satisfied branch wins.
    Or(Vec<Condition>),
    /// The inner condition does not hold.
    Not(Box<Condition>),
}

// ============================================================================
// Condition - Constructors
// ============================================================================

impl Condition {
    /// At least one matching element exists.
    #[inline]
    #[must_use]
    pub const fn present() -> Self {
        Self::Present
    }

    /// At least one matching element is visible.
    #[inline]
    #[must_use]
    pub const fn visible() -> Self {
        Self::Visible
    }

    /// At least one matching element is visible and enabled.
    #[inline]
    #[must_use]
    pub const fn clickable() -> Self {
        Self::Clickable
    }

    /// At least one matching element is enabled.
    #[inline]
    #[must_use]
    pub const fn enabled() -> Self {
        Self::Enabled
    }

    /// At least one matching element is selected.
    #[inline]
    #[must_use]
    pub const fn selected() -> Self {
        Self::Selected
    }

    /// At least one matching element has the given selection state.
    #[inline]
    #[must_use]
    pub const fn selection_is(state: bool) -> Self {
        Self::SelectionIs(state)
    }

    /// No matching element is visible.
    #[inline]
    #[must_use]
    pub const fn invisible() -> Self {
        Self::Invisible
    }

    /// The given handle has gone stale.
    #[inline]
    #[must_use]
    pub const fn stale(element: ElementHandle) -> Self {
        Self::Stale(element)
    }

    /// A matching element's trimmed text equals the string.
    #[inline]
    pub fn text_is(text: impl Into<String>) -> Self {
        Self::TextIs(text.into())
    }

    /// A matching element's text matches the pattern.
    #[inline]
    #[must_use]
    pub const fn text_matches(pattern: Regex) -> Self {
        Self::TextMatches(pattern)
    }

    /// A matching element's attribute equals the value.
    #[inline]
    pub fn attribute_is(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::AttributeIs {
            name: name.into(),
            value: value.into(),
        }
    }

    /// A matching element's attribute contains the substring.
    #[inline]
    pub fn attribute_contains(name: impl Into<String>, substring: impl Into<String>) -> Self {
        Self::AttributeContains {
            name: name.into(),
            substring: substring.into(),
        }
    }

    /// A matching element's DOM property equals the value.
    #[inline]
    pub fn property_is(name: impl Into<String>, value: Value) -> Self {
        Self::PropertyIs {
            name: name.into(),
            value,
        }
    }

    /// Exactly `n` elements match.
    #[inline]
    #[must_use]
    pub const fn count_is(n: usize) -> Self {
        Self::CountIs(n)
    }

    /// More than `n` elements match.
    #[inline]
    #[must_use]
    pub const fn count_greater_than(n: usize) -> Self {
        Self::CountGreaterThan(n)
    }

    /// Fewer than `n` elements match.
    #[inline]
    #[must_use]
    pub const fn count_less_than(n: usize) -> Self {
        Self::CountLessThan(n)
    }

    /// At least one element matches and all are visible.
    #[inline]
    #[must_use]
    pub const fn all_visible() -> Self {
        Self::AllVisible
    }

    /// The document URL contains the substring.
    #[inline]
    pub fn url_contains(fragment: impl Into<String>) -> Self {
        Self::UrlContains(fragment.into())
    }

    /// The document title equals the string.
    #[inline]
    pub fn title_is(title: impl Into<String>) -> Self {
        Self::TitleIs(title.into())
    }

    /// The document title contains the substring.
    #[inline]
    pub fn title_contains(fragment: impl Into<String>) -> Self {
        Self::TitleContains(fragment.into())
    }

    /// `document.readyState` is `"complete"`.
    #[inline]
    #[must_use]
    pub const fn document_ready() -> Self {
        Self::DocumentReady
    }

    /// Custom async predicate with a description for diagnostics.
    pub fn custom<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: for<'a> Fn(&'a dyn Session) -> BoxFuture<'a, Result<bool>> + Send + Sync + 'static,
    {
        Self::Custom {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }
}

// ============================================================================
// Condition - Combinators
// ============================================================================

impl Condition {
    /// Both conditions must hold within the same polling pass.
    #[must_use]
    pub fn and(self, other: Condition) -> Condition {
        match self {
            Condition::And(mut parts) => {
                parts.push(other);
                Condition::And(parts)
            }
            first => Condition::And(vec![first, other]),
        }
    }

    /// Either condition may hold; the first satisfied branch wins.
    #[must_use]
    pub fn or(self, other: Condition) -> Condition {
        match self {
            Condition::Or(mut parts) => {
                parts.push(other);
                Condition::Or(parts)
            }
            first => Condition::Or(vec![first, other]),
        }
    }

    /// Inverts the condition.
    #[must_use]
    pub fn negate(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}

// ============================================================================
// Condition - Description
// ============================================================================

impl Condition {
    /// Human-readable form used in timeout diagnostics.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Present => "present".to_string(),
            Self::Visible => "visible".to_string(),
            Self::Clickable => "clickable".to_string(),
            Self::Enabled => "enabled".to_string(),
            Self::Selected => "selected".to_string(),
            Self::SelectionIs(state) => format!("selection state {state}"),
            Self::TextIs(text) => format!("text == {text:?}"),
            Self::TextMatches(pattern) => format!("text matches /{pattern}/"),
            Self::AttributeIs { name, value } => format!("attribute {name} == {value:?}"),
            Self::AttributeContains { name, substring } => {
                format!("attribute {name} contains {substring:?}")
            }
            Self::PropertyIs { name, value } => format!("property {name} == {value}"),
            Self::Invisible => "invisible".to_string(),
            Self::Stale(element) => format!("stale({element})"),
            Self::CountIs(n) => format!("count == {n}"),
            Self::CountGreaterThan(n) => format!("count > {n}"),
            Self::CountLessThan(n) => format!("count < {n}"),
            Self::AllVisible => "all visible".to_string(),
            Self::UrlContains(fragment) => format!("url contains {fragment:?}"),
            Self::TitleIs(title) => format!("title == {title:?}"),
            Self::TitleContains(fragment) => format!("title contains {fragment:?}"),
            Self::DocumentReady => "document ready".to_string(),
            Self::Custom { description, .. } => description.clone(),
            Self::And(parts) => format!("all of [{}]", join_descriptions(parts)),
            Self::Or(parts) => format!("any of [{}]", join_descriptions(parts)),
            Self::Not(inner) => format!("not {}", inner.description()),
        }
    }
}

fn join_descriptions(parts: &[Condition]) -> String {
    parts
        .iter()
        .map(Condition::description)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Condition({})", self.description())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

// ============================================================================
// Condition - Evaluation
// ============================================================================

/// Result of one evaluation pass.
enum Outcome {
    /// The condition holds; carries the candidates that satisfy it.
    Satisfied(Vec<ElementHandle>),
    /// The condition does not hold this pass.
    Unsatisfied,
}

impl Condition {
    /// Evaluates the condition once against the current candidate set.
    ///
    /// Boxed for recursion through `And`/`Or`/`Not`.
    fn eval<'a>(
        &'a self,
        session: &'a dyn Session,
        candidates: &'a [ElementHandle],
    ) -> BoxFuture<'a, Result<Outcome>> {
        Box::pin(async move {
            match self {
                Self::Present
                | Self::Visible
                | Self::Clickable
                | Self::Enabled
                | Self::Selected
                | Self::SelectionIs(_)
                | Self::TextIs(_)
                | Self::TextMatches(_)
                | Self::AttributeIs { .. }
                | Self::AttributeContains { .. }
                | Self::PropertyIs { .. } => {
                    let mut hits = Vec::new();
                    for handle in candidates {
                        match self.holds_for(session, handle).await {
                            Ok(true) => hits.push(handle.clone()),
                            Ok(false) => {}
                            // Candidate vanished between query and check.
                            Err(e) if e.is_stale() => {}
                            Err(e) => return Err(e),
                        }
                    }
                    if hits.is_empty() {
                        Ok(Outcome::Unsatisfied)
                    } else {
                        Ok(Outcome::Satisfied(hits))
                    }
                }

                Self::Invisible => {
                    for handle in candidates {
                        match session.is_displayed(handle).await {
                            Ok(true) => return Ok(Outcome::Unsatisfied),
                            Ok(false) => {}
                            Err(e) if e.is_stale() => {}
                            Err(e) => return Err(e),
                        }
                    }
                    Ok(Outcome::Satisfied(Vec::new()))
                }

                Self::Stale(element) => match session.get_tag_name(element).await {
                    Err(e) if e.is_stale() => Ok(Outcome::Satisfied(Vec::new())),
                    Ok(_) => Ok(Outcome::Unsatisfied),
                    Err(e) => Err(e),
                },

                Self::CountIs(n) => Ok(collection(candidates, candidates.len() == *n)),
                Self::CountGreaterThan(n) => Ok(collection(candidates, candidates.len() > *n)),
                Self::CountLessThan(n) => Ok(collection(candidates, candidates.len() < *n)),

                Self::AllVisible => {
                    if candidates.is_empty() {
                        return Ok(Outcome::Unsatisfied);
                    }
                    for handle in candidates {
                        match session.is_displayed(handle).await {
                            Ok(true) => {}
                            Ok(false) => return Ok(Outcome::Unsatisfied),
                            Err(e) if e.is_stale() => return Ok(Outcome::Unsatisfied),
                            Err(e) => return Err(e),
                        }
                    }
                    Ok(Outcome::Satisfied(candidates.to_vec()))
                }

                Self::UrlContains(fragment) => {
                    let url = session.current_url().await?;
                    Ok(collection(candidates, url.contains(fragment)))
                }

                Self::TitleIs(title) => {
                    let current = session.get_title().await?;
                    Ok(collection(candidates, current == *title))
                }

                Self::TitleContains(fragment) => {
                    let current = session.get_title().await?;
                    Ok(collection(candidates, current.contains(fragment)))
                }

                Self::DocumentReady => {
                    let state = session
                        .execute_script("return document.readyState", &[])
                        .await?;
                    Ok(collection(candidates, state.as_str() == Some("complete")))
                }

                Self::Custom { predicate, .. } => {
                    Ok(collection(candidates, predicate(session).await?))
                }

                Self::And(parts) => {
                    let mut survivors = candidates.to_vec();
                    for part in parts {
                        match part.eval(session, &survivors).await? {
                            Outcome::Satisfied(next) => survivors = next,
                            Outcome::Unsatisfied => return Ok(Outcome::Unsatisfied),
                        }
                    }
                    Ok(Outcome::Satisfied(survivors))
                }

                Self::Or(parts) => {
                    for part in parts {
                        if let Outcome::Satisfied(subset) = part.eval(session, candidates).await? {
                            return Ok(Outcome::Satisfied(subset));
                        }
                    }
                    Ok(Outcome::Unsatisfied)
                }

                Self::Not(inner) => match inner.eval(session, candidates).await? {
                    Outcome::Satisfied(_) => Ok(Outcome::Unsatisfied),
                    Outcome::Unsatisfied => Ok(Outcome::Satisfied(candidates.to_vec())),
                },
            }
        })
    }

    /// Checks an element-scoped condition against one candidate.
    async fn holds_for(&self, session: &dyn Session, handle: &ElementHandle) -> Result<bool> {
        match self {
            Self::Present => Ok(true),
            Self::Visible => session.is_displayed(handle).await,
            Self::Clickable => {
                Ok(session.is_displayed(handle).await? && session.is_enabled(handle).await?)
            }
            Self::Enabled => session.is_enabled(handle).await,
            Self::Selected => session.is_selected(handle).await,
            Self::SelectionIs(state) => Ok(session.is_selected(handle).await? == *state),
            Self::TextIs(expected) => Ok(session.get_text(handle).await?.trim() == expected),
            Self::TextMatches(pattern) => Ok(pattern.is_match(&session.get_text(handle).await?)),
            Self::AttributeIs { name, value } => {
                Ok(session.get_attribute(handle, name).await?.as_deref() == Some(value.as_str()))
            }
            Self::AttributeContains { name, substring } => Ok(session
                .get_attribute(handle, name)
                .await?
                .is_some_and(|v| v.contains(substring))),
            Self::PropertyIs { name, value } => {
                Ok(session.get_property(handle, name).await?.as_ref() == Some(value))
            }
            _ => unreachable!("holds_for called on non-element condition"),
        }
    }
}

fn collection(candidates: &[ElementHandle], satisfied: bool) -> Outcome {
    if satisfied {
        Outcome::Satisfied(candidates.to_vec())
    } else {
        Outcome::Unsatisfied
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves the first element satisfying the condition.
///
/// Polls until the condition holds for at least one candidate or the
/// timeout elapses. Returns within at most one poll interval past the
/// timeout.
///
/// # Errors
///
/// [`Error::NotFound`] if the locator never matched anything,
/// [`Error::Timeout`] if candidates existed but the condition never held.
pub async fn resolve(
    session: &dyn Session,
    by: &By,
    condition: &Condition,
    options: WaitOptions,
) -> Result<ElementHandle> {
    let mut matches = poll(session, Some(by), condition, options, true).await?;
    Ok(matches.remove(0))
}

/// Resolves every element satisfying the condition.
///
/// Same contract as [`resolve`]; the returned set is non-empty.
pub async fn resolve_all(
    session: &dyn Session,
    by: &By,
    condition: &Condition,
    options: WaitOptions,
) -> Result<Vec<ElementHandle>> {
    poll(session, Some(by), condition, options, true).await
}

/// Waits until the condition holds for the locator's candidates, without
/// requiring a resolved element.
///
/// Suits conditions that can hold vacuously, such as
/// [`Condition::invisible`] or [`Condition::count_is`]`(0)`.
pub async fn wait_until(
    session: &dyn Session,
    by: &By,
    condition: &Condition,
    options: WaitOptions,
) -> Result<()> {
    poll(session, Some(by), condition, options, false).await?;
    Ok(())
}

/// Waits on a document-scoped condition with no locator.
///
/// Element-scoped conditions never hold here: there are no candidates.
pub async fn wait_for(
    session: &dyn Session,
    condition: &Condition,
    options: WaitOptions,
) -> Result<()> {
    poll(session, None, condition, options, false).await?;
    Ok(())
}

/// Shared polling loop.
///
/// Evaluates at least once even with a zero timeout. `need_element`
/// requires a non-empty satisfying subset before the wait completes.
async fn poll(
    session: &dyn Session,
    by: Option<&By>,
    condition: &Condition,
    options: WaitOptions,
    need_element: bool,
) -> Result<Vec<ElementHandle>> {
    let timeout_ms = options.timeout.as_millis() as u64;
    let description = condition.description();

    match by {
        Some(by) => debug!(
            selector = %by,
            condition = %description,
            timeout_ms,
            "Waiting for condition"
        ),
        None => debug!(condition = %description, timeout_ms, "Waiting for condition"),
    }

    let start = Instant::now();
    let mut saw_candidate = false;

    loop {
        let candidates = match by {
            Some(by) => session.find_elements(by).await?,
            None => Vec::new(),
        };
        saw_candidate |= !candidates.is_empty();

        if let Outcome::Satisfied(subset) = condition.eval(session, &candidates).await? {
            if !need_element || !subset.is_empty() {
                debug!(
                    condition = %description,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    matches = subset.len(),
                    "Condition satisfied"
                );
                return Ok(subset);
            }
        }

        if start.elapsed() >= options.timeout {
            break;
        }
        sleep(options.poll_interval).await;
    }

    match by {
        Some(by) if !saw_candidate => Err(Error::not_found(by.to_string(), timeout_ms)),
        Some(by) => Err(Error::timeout(
            format!("wait_for({by}, {description})"),
            timeout_ms,
        )),
        None => Err(Error::timeout(format!("wait_for({description})"), timeout_ms)),
    }
}

// ============================================================================
// Tests
// ============================================================================
