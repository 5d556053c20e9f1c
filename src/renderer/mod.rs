//! Browser abstraction for the harvest pipeline.
//!
//! All catalog logic talks to a [`RenderContext`] rather than to
//! chromiumoxide directly, so the enumeration/extraction/driver code can be
//! exercised against a scripted fake in tests.

pub mod chromium;

use anyhow::Result;
use async_trait::async_trait;

pub use chromium::ChromiumSession;

/// One live browsing context: a page with cookies and navigation state.
///
/// The driver owns exactly one of these for a run and closes it exactly
/// once, on success and on every failure path.
#[async_trait]
pub trait RenderContext: Send {
    /// Navigate to a URL and wait for the load to settle.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()>;

    /// Evaluate a JavaScript expression on the current page and return its
    /// JSON value.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;

    /// Fill a form input identified by selector with a value.
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Click the first element matching a selector.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Wait until an element matching the selector exists.
    ///
    /// With a timeout, resolves to `false` if the element never appeared
    /// within it. Without one, polls until the element exists (the caller
    /// controls navigation timing, so the element is expected).
    async fn wait_for_selector(&self, selector: &str, timeout_ms: Option<u64>) -> Result<bool>;

    /// URL of the page currently loaded in this context.
    async fn current_url(&self) -> Result<String>;

    /// Tear down the context and release the underlying browser.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Launch options for the real browser.
#[derive(Debug, Clone, Default)]
pub struct RendererOptions {
    /// Run with a visible browser window instead of headless.
    pub headful: bool,
}
