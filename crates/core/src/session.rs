//! Session lifecycle: bootstrap once, tear down exactly once.

use tracing::{info, warn};

use crate::chromium::ChromiumDriver;
use crate::config::{Config, selectors};
use crate::driver::Driver;
use crate::error::{Error, Result};

/// A live, authenticated handle on the messaging web client.
///
/// A `Session` value only exists in the ready state: [`Session::bootstrap`]
/// returns one after the authenticated marker is observed, and
/// [`Session::teardown`] consumes it, so a closed session cannot be reused.
/// The dispatcher borrows it; it never owns or closes it.
pub struct Session {
    driver: Box<dyn Driver>,
    config: Config,
}

impl Session {
    /// Launches the production Chromium driver against the configured
    /// profile directory and bootstraps it.
    pub async fn launch(config: Config) -> Result<Self> {
        let driver = ChromiumDriver::launch(&config.profile_dir, config.headless).await?;
        Self::bootstrap(Box::new(driver), config).await
    }

    /// Opens the messaging client and waits for the post-authentication DOM
    /// marker. If it does not appear within the bootstrap timeout the
    /// session is assumed to be pending a login (QR scan) and the same
    /// marker is awaited once more under the longer login grace timeout.
    /// If that wait also fails, the driver is closed and the bootstrap
    /// error is returned.
    pub async fn bootstrap(driver: Box<dyn Driver>, config: Config) -> Result<Self> {
        info!(target = "wablast", url = %config.landing_url, "opening messaging client");

        if let Err(err) = driver.goto(&config.landing_url).await {
            close_driver(driver).await;
            return Err(Error::Bootstrap(format!(
                "could not open {}: {err}",
                config.landing_url
            )));
        }

        if let Err(first) = driver
            .wait_for(selectors::AUTHENTICATED, config.bootstrap_timeout)
            .await
        {
            info!(
                target = "wablast",
                error = %first,
                "authentication pending; waiting for login (scan the QR code)"
            );
            if let Err(second) = driver
                .wait_for(selectors::AUTHENTICATED, config.login_grace)
                .await
            {
                close_driver(driver).await;
                return Err(Error::Bootstrap(format!(
                    "authenticated marker never appeared: {second}"
                )));
            }
        }

        info!(target = "wablast", "session ready");
        Ok(Self { driver, config })
    }

    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Releases all automation resources. Never fails: by the time teardown
    /// runs the run's outcome is already determined, so close faults are
    /// logged and swallowed.
    pub async fn teardown(self) {
        info!(target = "wablast", "tearing down session");
        close_driver(self.driver).await;
    }
}

async fn close_driver(driver: Box<dyn Driver>) {
    if let Err(err) = driver.close().await {
        warn!(target = "wablast", error = %err, "browser close failed");
    }
}
