//! The element-interaction facade.
//!
//! [`Interactor`] is the one surface page code talks to. Every operation
//! resolves its locator fresh, waits for the state the action needs, and
//! classifies failures per the crate error taxonomy. Page objects hold a
//! cheap clone of the facade instead of inheriting interaction behavior.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Interactor struct, constructors, shared resolution plumbing |
//! | `click` | Native click with stale retries, script click |
//! | `text` | Text entry, script value assignment |
//! | `select` | Option selection by label, value, or index |
//! | `read` | Text/attribute/property reads, boolean probes |
//! | `scroll` | Viewport-gated scrolling, debug highlight |
//! | `frames` | Frame switching |
//! | `page` | Page-ready wait, condition waits, pauses |
//! | `upload` | Direct and synthetic file upload |
//! | `download` | Download-and-verify composite, download dir upkeep |
//!
//! # Example
//!
//! ```ignore
//! let interactor = Interactor::new(session);
//!
//! interactor.wait_for_page_load().await?;
//! interactor.enter_text(&By::id("email"), "user@example.com").await?;
//! interactor.click(&By::css("button[type=submit]")).await?;
//!
//! let banner = interactor.get_text(&By::css(".flash")).await?;
//! assert_eq!(banner, "Welcome back");
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod click;
mod core;
mod download;
mod frames;
mod page;
mod read;
mod scroll;
mod select;
mod text;
mod upload;

// ============================================================================
// Re-exports
// ============================================================================

pub use core::Interactor;
pub use download::DownloadVerification;
