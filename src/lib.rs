//! WebDriver Interactor - Robust element interaction for browser UI tests.
//!
//! This library is the interaction core of a UI test suite: it waits for
//! elements to reach the state an action needs, retries transient DOM
//! instability, and falls back to script injection where native automation
//! cannot reach.
//!
//! # Architecture
//!
//! Four layers, in dependency order:
//!
//! - **Resolver** ([`wait`]): polls the live DOM until a [`Condition`]
//!   holds or the timeout expires; composite conditions evaluate as one
//!   wait unit per poll
//! - **Retry engine** ([`Interactor`] click/text/select): bounded
//!   staleness retries and a linear-backoff enabling poll around each
//!   action
//! - **Script fallbacks**: viewport-gated scrolling, script click and
//!   value assignment, synthetic drag-and-drop upload
//! - **Facade** ([`Interactor`]): one timeout-overloaded surface page
//!   objects call
//!
//! Key design principles:
//!
//! - Locators resolve fresh on every operation; element handles are never
//!   cached across calls
//! - Staleness is the only retried failure, everything else fails fast
//! - Boolean probes (`is_displayed`, `is_enabled`, `is_selected`) never
//!   raise
//!
//! # Quick Start
//!
//! ```no_run
//! use webdriver_interactor::{By, Condition, Interactor, MockSession, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Any Session implementation works; the mock serves as a stand-in
//!     let session = MockSession::new();
//!     let interactor = Interactor::new(session);
//!
//!     interactor.wait_for_page_load().await?;
//!     interactor.enter_text(&By::id("email"), "user@example.com").await?;
//!     interactor.click(&By::css("button[type=submit]")).await?;
//!
//!     let banner = interactor
//!         .wait_until(&By::css(".flash"), &Condition::text_is("Welcome back"))
//!         .await?;
//!     println!("Resolved: {}", banner);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | [`InteractorConfig`] defaults, builders, env overrides |
//! | [`error`] | Error taxonomy and [`Result`] alias |
//! | [`interactor`] | The [`Interactor`] facade |
//! | [`locator`] | [`By`] locator strategies |
//! | [`mock`] | Scriptable in-memory [`Session`] for tests |
//! | [`session`] | The [`Session`] boundary trait |
//! | [`wait`] | [`Condition`] predicates and the polling resolver |
//!
//! # Features
//!
//! - **Single wait unit**: AND/OR conditions evaluate together per poll,
//!   no race windows between separately awaited halves
//! - **Classified failures**: `NotFound` vs `Timeout` vs
//!   `NotInteractable`, with staleness absorbed up to a bounded cap
//! - **Deterministic tests**: the mock session plus paused-time polling
//!   make every wait path testable without a browser

// ============================================================================
// Modules
// ============================================================================

/// Facade configuration.
///
/// Defaults, builder methods, and environment-variable overrides.
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// The element-interaction facade.
///
/// [`Interactor`] composes the resolver, the retry engine, and the
/// script fallbacks behind one API.
pub mod interactor;

/// Locator strategies.
///
/// [`By`] pairs a strategy with a selector string.
pub mod locator;

/// Scriptable in-memory session.
///
/// A [`Session`] double with per-element state knobs and full call
/// recording, for tests and demos.
pub mod mock;

/// The browser session boundary.
///
/// [`Session`] is the narrow trait the core drives; implement it over a
/// WebDriver client to run against a real browser.
pub mod session;

/// Wait conditions and the polling resolver.
///
/// [`Condition`] predicates compose with `and`/`or`/`negate` and resolve
/// through [`wait::resolve`] and friends.
pub mod wait;

mod script;

// ============================================================================
// Re-exports
// ============================================================================

// Facade types
pub use interactor::{DownloadVerification, Interactor};

// Configuration
pub use config::InteractorConfig;

// Error types
pub use error::{Error, Result};

// Locator and session types
pub use locator::By;
pub use session::{ElementHandle, ScriptArg, Session};

// Wait types
pub use wait::{Condition, WaitOptions};

// Test double
pub use mock::MockSession;
