//! Per-recipient dispatch loop.
//!
//! Each recipient goes through `Navigating → AwaitingChatReady →
//! {ChatLoadTimeout} | SendingMessage → {Sent | SendFailure}`. Faults are
//! caught at the recipient boundary and converted into an [`Outcome`]; the
//! loop always continues to the next recipient.

use tracing::{debug, info, warn};

use crate::config::selectors;
use crate::driver::Key;
use crate::error::Result;
use crate::feed::Recipient;
use crate::message::{Payload, chunks};
use crate::session::Session;

/// Terminal status of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Sent,
    /// The recipient's chat surface never loaded — typically an invalid or
    /// unreachable number. The batch continues.
    ChatLoadTimeout,
    /// The chat loaded but injecting or submitting the message failed. The
    /// batch continues.
    SendFailure,
}

/// Per-recipient result, produced exactly once per feed entry and consumed
/// only for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub recipient: Recipient,
    pub status: Status,
    pub detail: Option<String>,
}

impl Outcome {
    fn sent(recipient: Recipient) -> Self {
        Self {
            recipient,
            status: Status::Sent,
            detail: None,
        }
    }

    fn chat_load_timeout(recipient: Recipient, detail: String) -> Self {
        Self {
            recipient,
            status: Status::ChatLoadTimeout,
            detail: Some(detail),
        }
    }

    fn send_failure(recipient: Recipient, detail: String) -> Self {
        Self {
            recipient,
            status: Status::SendFailure,
            detail: Some(detail),
        }
    }
}

/// Drives the messaging loop over a borrowed [`Session`]. The session and
/// payload outlive the dispatcher; nothing here owns browser state.
pub struct Dispatcher<'a> {
    session: &'a Session,
    payload: &'a Payload,
}

impl<'a> Dispatcher<'a> {
    pub fn new(session: &'a Session, payload: &'a Payload) -> Self {
        Self { session, payload }
    }

    /// Processes every recipient in feed order, strictly sequentially,
    /// invoking `on_outcome` as each outcome is produced and pacing between
    /// recipients. Returns the outcomes in the same order as the feed.
    pub async fn run<I, F>(&self, feed: I, mut on_outcome: F) -> Vec<Outcome>
    where
        I: IntoIterator<Item = Recipient>,
        F: FnMut(&Outcome),
    {
        let config = self.session.config();
        let mut outcomes = Vec::new();
        for recipient in feed {
            let outcome = self.dispatch(recipient).await;
            on_outcome(&outcome);
            outcomes.push(outcome);
            tokio::time::sleep(config.recipient_pause).await;
        }
        outcomes
    }

    /// Runs the full per-recipient sequence, converting every fault into an
    /// outcome. This is the failure-isolation boundary: nothing propagates
    /// out of here.
    pub async fn dispatch(&self, recipient: Recipient) -> Outcome {
        info!(target = "wablast", recipient = %recipient, "dispatching");

        if let Err(err) = self.open_chat(&recipient).await {
            warn!(target = "wablast", recipient = %recipient, error = %err, "chat never became ready");
            return Outcome::chat_load_timeout(recipient, err.to_string());
        }

        match self.deliver().await {
            Ok(()) => {
                info!(target = "wablast", recipient = %recipient, "sent");
                Outcome::sent(recipient)
            }
            Err(err) => {
                warn!(target = "wablast", recipient = %recipient, error = %err, "send failed");
                Outcome::send_failure(recipient, err.to_string())
            }
        }
    }

    /// Navigates to the recipient's chat and waits for the conversation
    /// surface. A navigation fault is not handled separately: it surfaces
    /// as the readiness wait timing out.
    async fn open_chat(&self, recipient: &Recipient) -> Result<()> {
        let config = self.session.config();
        let url = config.chat_url(recipient.as_str());

        if let Err(err) = self.session.driver().goto(&url).await {
            debug!(target = "wablast", error = %err, "navigation fault; deferring to readiness wait");
        }

        self.session
            .driver()
            .wait_for(selectors::CHAT_SURFACE, config.chat_timeout)
            .await?;
        Ok(())
    }

    /// Attaches the image if configured, then clears and types the message
    /// in chunks and submits it.
    async fn deliver(&self) -> Result<()> {
        let config = self.session.config();
        let driver = self.session.driver();

        if let Some(image) = &self.payload.attachment {
            let attach = driver
                .wait_for(selectors::ATTACH_BUTTON, config.input_timeout)
                .await?;
            attach.click().await?;
            tokio::time::sleep(config.action_pause).await;

            let file_input = driver
                .wait_for(selectors::FILE_INPUT, config.input_timeout)
                .await?;
            file_input.upload(image).await?;
            tokio::time::sleep(config.action_pause).await;
        }

        let input = driver
            .wait_for(selectors::MESSAGE_INPUT, config.input_timeout)
            .await?;

        // Clear residual content first; a prior partial failure may have
        // left stale text in the compose box.
        input.click().await?;
        input.press(Key::SelectAll).await?;
        input.press(Key::Delete).await?;

        for chunk in chunks(&self.payload.text, config.chunk_size) {
            input.type_text(chunk).await?;
            tokio::time::sleep(config.chunk_pause).await;
        }

        tokio::time::sleep(config.settle_pause).await;
        input.press(Key::Enter).await
    }
}
