use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::{info, warn};
use wablast::{Config, Dispatcher, Outcome, Payload, Result, Session, Status, feed, message};

pub async fn execute(
    message_file: &Path,
    recipients_file: &Path,
    image: Option<&Path>,
    country_code: String,
    profile_dir: PathBuf,
    headless: bool,
) -> Result<()> {
    // Both inputs are validated before any browser work starts.
    let payload = Payload::from_files(message_file, image)?;
    let source = message::read_input(recipients_file)?;

    let config = Config {
        country_code,
        profile_dir,
        headless,
        ..Config::default()
    };

    let session = Session::launch(config).await?;
    let dispatcher = Dispatcher::new(&session, &payload);

    let mut index = 0usize;
    let batch = dispatcher.run(feed::recipients(&source), |outcome| {
        index += 1;
        report(index, outcome);
    });

    tokio::select! {
        outcomes = batch => {
            info!(target = "wablast", recipients = outcomes.len(), "batch finished");
        }
        _ = tokio::signal::ctrl_c() => {
            warn!(target = "wablast", "interrupted; abandoning current recipient");
        }
    }

    session.teardown().await;
    Ok(())
}

fn report(index: usize, outcome: &Outcome) {
    match outcome.status {
        Status::Sent => {
            println!("[{index}] {} {}", "sent".green(), outcome.recipient);
        }
        Status::ChatLoadTimeout => {
            println!(
                "[{index}] {} {} ({})",
                "chat timeout".yellow(),
                outcome.recipient,
                outcome.detail.as_deref().unwrap_or("no detail")
            );
        }
        Status::SendFailure => {
            println!(
                "[{index}] {} {} ({})",
                "failed".red(),
                outcome.recipient,
                outcome.detail.as_deref().unwrap_or("no detail")
            );
        }
    }
}
