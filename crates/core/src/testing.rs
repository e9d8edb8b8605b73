//! Testing infrastructure: a mock automation driver.
//!
//! [`MockDriver`] implements [`Driver`] without spawning a browser. It
//! records every action for later assertion and returns configured results:
//! selectors can be present, appear only after a number of failed waits
//! (two-stage login), or time out whenever the current URL matches a rule
//! (unreachable recipients). Configure and assert through the paired
//! [`MockHandle`], which stays valid after the driver has been consumed by
//! a session.
//!
//! # Example
//!
//! ```ignore
//! use wablast::testing::{MockDriver, test_config};
//! use wablast::Session;
//!
//! let (driver, handle) = MockDriver::ready();
//! let session = Session::bootstrap(Box::new(driver), test_config()).await?;
//! // ... drive the dispatcher, then:
//! assert!(!handle.closed());
//! session.teardown().await;
//! assert!(handle.closed());
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{Config, selectors};
use crate::driver::{Driver, Element, Key};
use crate::error::{Error, Result};

/// Action recorded by [`MockDriver`] for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverAction {
    Goto { url: String },
    WaitFor { selector: String },
    Click { selector: String },
    Type { selector: String, text: String },
    Press { selector: String, key: Key },
    Upload { selector: String, path: PathBuf },
    Close,
}

#[derive(Default)]
struct MockState {
    present: Mutex<HashSet<String>>,
    // selector -> number of waits that still time out before it appears
    deferred: Mutex<HashMap<String, usize>>,
    // (selector, url substring): waiting for selector fails while the
    // current URL contains the substring
    wait_faults: Mutex<Vec<(String, String)>>,
    type_faults: Mutex<HashSet<String>>,
    fail_close: Mutex<bool>,
    current_url: Mutex<String>,
    actions: Mutex<Vec<DriverAction>>,
    closed: Mutex<bool>,
}

impl MockState {
    fn record(&self, action: DriverAction) {
        self.actions.lock().unwrap().push(action);
    }
}

fn timeout_error(selector: &str, timeout: Duration) -> Error {
    Error::Timeout {
        ms: timeout.as_millis() as u64,
        condition: selector.to_string(),
    }
}

/// Mock driver recording actions and serving configured wait results.
pub struct MockDriver {
    state: Arc<MockState>,
}

/// Configuration and assertion handle for a [`MockDriver`].
#[derive(Clone)]
pub struct MockHandle {
    state: Arc<MockState>,
}

impl MockDriver {
    /// A bare driver: every wait times out until selectors are configured.
    pub fn empty() -> (Self, MockHandle) {
        let state = Arc::new(MockState::default());
        (
            Self {
                state: state.clone(),
            },
            MockHandle { state },
        )
    }

    /// A driver with every selector the messaging flow touches already
    /// present: authenticated marker, chat surface, attach control, file
    /// input, and message input.
    pub fn ready() -> (Self, MockHandle) {
        let (driver, handle) = Self::empty();
        for selector in [
            selectors::AUTHENTICATED,
            selectors::CHAT_SURFACE,
            selectors::ATTACH_BUTTON,
            selectors::FILE_INPUT,
            selectors::MESSAGE_INPUT,
        ] {
            handle.set_present(selector);
        }
        (driver, handle)
    }
}

impl MockHandle {
    /// Marks `selector` as immediately present.
    pub fn set_present(&self, selector: &str) {
        self.state
            .present
            .lock()
            .unwrap()
            .insert(selector.to_string());
    }

    /// Makes the first `failures` waits on `selector` time out; later waits
    /// succeed.
    pub fn set_appears_after(&self, selector: &str, failures: usize) {
        self.state
            .deferred
            .lock()
            .unwrap()
            .insert(selector.to_string(), failures);
    }

    /// Makes waits on `selector` time out while the current URL contains
    /// `url_fragment`.
    pub fn set_wait_fault_when(&self, selector: &str, url_fragment: &str) {
        self.state
            .wait_faults
            .lock()
            .unwrap()
            .push((selector.to_string(), url_fragment.to_string()));
    }

    /// Makes `type_text` on `selector` fail.
    pub fn set_type_fault(&self, selector: &str) {
        self.state
            .type_faults
            .lock()
            .unwrap()
            .insert(selector.to_string());
    }

    /// Makes `close` return an error (teardown must swallow it).
    pub fn set_close_fault(&self) {
        *self.state.fail_close.lock().unwrap() = true;
    }

    /// All recorded actions, in order.
    pub fn actions(&self) -> Vec<DriverAction> {
        self.state.actions.lock().unwrap().clone()
    }

    /// Whether `close` has been called.
    pub fn closed(&self) -> bool {
        *self.state.closed.lock().unwrap()
    }

    /// Number of recorded `Close` actions.
    pub fn close_count(&self) -> usize {
        self.actions()
            .iter()
            .filter(|action| matches!(action, DriverAction::Close))
            .count()
    }

    /// Recorded `Type` texts for `selector`, in emission order.
    pub fn typed_chunks(&self, selector: &str) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                DriverAction::Type {
                    selector: sel,
                    text,
                } if sel == selector => Some(text),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        self.state.record(DriverAction::Goto {
            url: url.to_string(),
        });
        *self.state.current_url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<Box<dyn Element>> {
        self.state.record(DriverAction::WaitFor {
            selector: selector.to_string(),
        });

        let current_url = self.state.current_url.lock().unwrap().clone();
        let url_fault = self
            .state
            .wait_faults
            .lock()
            .unwrap()
            .iter()
            .any(|(sel, fragment)| sel == selector && current_url.contains(fragment));
        if url_fault {
            return Err(timeout_error(selector, timeout));
        }

        if let Some(remaining) = self.state.deferred.lock().unwrap().get_mut(selector) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(timeout_error(selector, timeout));
            }
            return Ok(Box::new(MockElement {
                selector: selector.to_string(),
                state: self.state.clone(),
            }));
        }

        if self.state.present.lock().unwrap().contains(selector) {
            Ok(Box::new(MockElement {
                selector: selector.to_string(),
                state: self.state.clone(),
            }))
        } else {
            Err(timeout_error(selector, timeout))
        }
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.state.record(DriverAction::Close);
        *self.state.closed.lock().unwrap() = true;
        if *self.state.fail_close.lock().unwrap() {
            Err(Error::Driver("injected close fault".to_string()))
        } else {
            Ok(())
        }
    }
}

struct MockElement {
    selector: String,
    state: Arc<MockState>,
}

#[async_trait]
impl Element for MockElement {
    async fn click(&self) -> Result<()> {
        self.state.record(DriverAction::Click {
            selector: self.selector.clone(),
        });
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        if self.state.type_faults.lock().unwrap().contains(&self.selector) {
            return Err(Error::Driver("injected type fault".to_string()));
        }
        self.state.record(DriverAction::Type {
            selector: self.selector.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn press(&self, key: Key) -> Result<()> {
        self.state.record(DriverAction::Press {
            selector: self.selector.clone(),
            key,
        });
        Ok(())
    }

    async fn upload(&self, path: &Path) -> Result<()> {
        self.state.record(DriverAction::Upload {
            selector: self.selector.clone(),
            path: path.to_path_buf(),
        });
        Ok(())
    }
}

/// Run config with all pacing zeroed and short timeouts, for fast tests.
pub fn test_config() -> Config {
    Config {
        bootstrap_timeout: Duration::from_millis(10),
        login_grace: Duration::from_millis(10),
        chat_timeout: Duration::from_millis(10),
        input_timeout: Duration::from_millis(10),
        chunk_pause: Duration::ZERO,
        settle_pause: Duration::ZERO,
        action_pause: Duration::ZERO,
        recipient_pause: Duration::ZERO,
        ..Config::default()
    }
}
