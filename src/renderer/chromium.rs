//! chromiumoxide-backed [`RenderContext`].
//!
//! Owns the browser process, its CDP event handler task, and a single page.
//! Closing the session shuts all three down so no Chromium process leaks.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::renderer::{RenderContext, RendererOptions};

/// Poll interval for selector waits.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A live Chromium browser with one open page.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumSession {
    /// Launch a browser and open a blank page.
    pub async fn launch(options: &RendererOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder();
        if options.headful {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(|e| anyhow!(e))?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .context("launching chromium")?;

        // Drive CDP events until the browser goes away.
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("opening initial page")?;

        Ok(Self {
            browser,
            page,
            handler,
        })
    }
}

#[async_trait]
impl RenderContext for ChromiumSession {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()> {
        debug!("navigating to {url}");
        let nav = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, anyhow::Error>(())
        };
        tokio::time::timeout(Duration::from_millis(timeout_ms), nav)
            .await
            .map_err(|_| anyhow!("navigation to {url} timed out after {timeout_ms}ms"))?
            .with_context(|| format!("navigating to {url}"))
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .context("evaluating script")?;
        Ok(result.into_value().unwrap_or(serde_json::Value::Null))
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.page
            .find_element(selector)
            .await
            .with_context(|| format!("no element matches {selector}"))?
            .click()
            .await?
            .type_str(value)
            .await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.page
            .find_element(selector)
            .await
            .with_context(|| format!("no element matches {selector}"))?
            .click()
            .await?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: Option<u64>) -> Result<bool> {
        let deadline = timeout_ms.map(|ms| tokio::time::Instant::now() + Duration::from_millis(ms));
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(true);
            }
            if let Some(deadline) = deadline {
                if tokio::time::Instant::now() >= deadline {
                    return Ok(false);
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn current_url(&self) -> Result<String> {
        let url = self
            .page
            .url()
            .await
            .context("reading page url")?
            .unwrap_or_default();
        Ok(url)
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let Self {
            mut browser,
            page,
            handler,
        } = *self;
        drop(page);
        browser.close().await.context("closing browser")?;
        browser.wait().await.context("waiting for browser exit")?;
        handler.abort();
        Ok(())
    }
}
