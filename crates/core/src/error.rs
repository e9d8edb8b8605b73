use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The authenticated session could not be established. Fatal: the run
    /// aborts after best-effort teardown.
    #[error("session bootstrap failed: {0}")]
    Bootstrap(String),

    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// An input file (message body, recipients list, or attachment) is
    /// absent. Fatal: raised before any session work starts.
    #[error("missing input file: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("timeout after {ms}ms waiting for: {condition}")]
    Timeout { ms: u64, condition: String },

    #[error("navigation failed: {url}")]
    Navigation {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("driver fault: {0}")]
    Driver(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
