//! wablast: batch messaging over WhatsApp Web through a controlled browser.
//!
//! The crate drives the WhatsApp Web client to deliver one message to a list
//! of recipients, one at a time, optionally attaching an image. A [`Session`]
//! owns the automated browser and guarantees a single teardown; the
//! [`feed`] module turns raw input lines into normalized recipients; the
//! [`Dispatcher`] runs the per-recipient loop — navigate, wait for the chat
//! surface, clear-then-type the message in chunks, submit — converting every
//! per-recipient fault into an [`Outcome`] so one bad number never aborts
//! the batch.
//!
//! # Example
//!
//! ```ignore
//! use wablast::{Config, Dispatcher, Payload, Session, feed};
//!
//! #[tokio::main]
//! async fn main() -> wablast::Result<()> {
//!     let config = Config::default();
//!     let payload = Payload::from_files("message.txt".as_ref(), None)?;
//!     let source = wablast::message::read_input("numbers.txt".as_ref())?;
//!
//!     let session = Session::launch(config).await?;
//!     let dispatcher = Dispatcher::new(&session, &payload);
//!     let outcomes = dispatcher
//!         .run(feed::recipients(&source), |outcome| println!("{outcome:?}"))
//!         .await;
//!     session.teardown().await;
//!
//!     println!("{} recipients processed", outcomes.len());
//!     Ok(())
//! }
//! ```

pub mod chromium;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod feed;
pub mod message;
pub mod session;
pub mod testing;

pub use chromium::ChromiumDriver;
pub use config::Config;
pub use dispatch::{Dispatcher, Outcome, Status};
pub use driver::{Driver, Element, Key};
pub use error::{Error, Result};
pub use feed::Recipient;
pub use message::Payload;
pub use session::Session;
