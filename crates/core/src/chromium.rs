//! CDP-backed driver implementation.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType};
use chromiumoxide::error::CdpError;
use chromiumoxide::{Element as CdpElement, Page};
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::driver::{Driver, Element, Key};
use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// CDP `modifiers` bitmask for Control.
const MODIFIER_CTRL: i64 = 2;

fn driver_err(err: CdpError) -> Error {
    Error::Driver(err.to_string())
}

/// A Chromium instance bound to a persistent profile directory, driven over
/// the DevTools protocol.
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
    event_loop: JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launches Chromium with its state rooted at `profile_dir` (created if
    /// absent) so the messaging client's login survives across runs.
    pub async fn launch(profile_dir: &Path, headless: bool) -> Result<Self> {
        std::fs::create_dir_all(profile_dir)?;

        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile_dir)
            .viewport(None);
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(Error::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| Error::BrowserLaunch(err.to_string()))?;

        // The handler stream must be drained for the browser to function.
        let event_loop = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|err| Error::BrowserLaunch(err.to_string()))?;

        Ok(Self {
            browser,
            page,
            event_loop,
        })
    }
}

#[async_trait]
impl Driver for ChromiumDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map(|_| ())
            .map_err(|err| Error::Navigation {
                url: url.to_string(),
                source: anyhow::Error::new(err),
            })
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<Box<dyn Element>> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.page.find_element(selector).await {
                Ok(element) => {
                    return Ok(Box::new(ChromiumElement {
                        element,
                        page: self.page.clone(),
                    }));
                }
                Err(err) => {
                    if Instant::now() >= deadline {
                        debug!(target = "wablast", %selector, error = %err, "wait timed out");
                        return Err(Error::Timeout {
                            ms: timeout.as_millis() as u64,
                            condition: selector.to_string(),
                        });
                    }
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let mut this = *self;
        let result = this
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(driver_err);
        this.event_loop.abort();
        result
    }
}

struct ChromiumElement {
    element: CdpElement,
    page: Page,
}

impl ChromiumElement {
    /// Select-all is a modifier chord, which the element-level key API does
    /// not express; dispatch raw key events instead.
    async fn press_ctrl_a(&self) -> Result<()> {
        for event_type in [DispatchKeyEventType::KeyDown, DispatchKeyEventType::KeyUp] {
            let event = DispatchKeyEventParams::builder()
                .r#type(event_type)
                .key("a")
                .code("KeyA")
                .modifiers(MODIFIER_CTRL)
                .windows_virtual_key_code(65)
                .native_virtual_key_code(65)
                .build()
                .map_err(Error::Driver)?;
            self.page.execute(event).await.map_err(driver_err)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Element for ChromiumElement {
    async fn click(&self) -> Result<()> {
        self.element.click().await.map(|_| ()).map_err(driver_err)
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.element
            .type_str(text)
            .await
            .map(|_| ())
            .map_err(driver_err)
    }

    async fn press(&self, key: Key) -> Result<()> {
        match key {
            Key::Enter => self
                .element
                .press_key("Enter")
                .await
                .map(|_| ())
                .map_err(driver_err),
            Key::Delete => self
                .element
                .press_key("Delete")
                .await
                .map(|_| ())
                .map_err(driver_err),
            Key::SelectAll => self.press_ctrl_a().await,
        }
    }

    async fn upload(&self, path: &Path) -> Result<()> {
        // Resolving through the element's object id also works for hidden
        // file inputs, which is what the attach control exposes.
        let params = SetFileInputFilesParams::builder()
            .files(vec![path.to_string_lossy().into_owned()])
            .object_id(self.element.remote_object_id.clone())
            .build()
            .map_err(Error::Driver)?;
        self.page
            .execute(params)
            .await
            .map(|_| ())
            .map_err(driver_err)
    }
}
