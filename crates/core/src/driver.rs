//! Boundary to the browser-automation binding.
//!
//! The messaging loop only ever needs four page operations (navigate, wait
//! for a selector, key input, file upload), so that surface is expressed as
//! a pair of object-safe traits. [`crate::ChromiumDriver`] is the production
//! implementation; [`crate::testing::MockDriver`] records actions for tests.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Keys the dispatcher sends to the message input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    SelectAll,
    Delete,
}

/// A located DOM element, valid for the page it was found on.
#[async_trait]
pub trait Element: Send + Sync {
    async fn click(&self) -> Result<()>;

    /// Sends `text` as keystrokes into the element.
    async fn type_text(&self, text: &str) -> Result<()>;

    async fn press(&self, key: Key) -> Result<()>;

    /// Submits a filesystem path to a file-input control.
    async fn upload(&self, path: &Path) -> Result<()>;
}

/// A live automated-browser page.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    /// Waits until `selector` matches an element, polling up to `timeout`.
    /// Returns [`crate::Error::Timeout`] if it never appears.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<Box<dyn Element>>;

    /// Releases the browser. Consumes the driver; there is no way to close
    /// twice.
    async fn close(self: Box<Self>) -> Result<()>;
}
