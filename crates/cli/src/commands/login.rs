use std::path::PathBuf;

use wablast::{Config, Result, Session};

/// Bootstrap only: open the client against the persistent profile so the
/// user can scan the QR code, then release the browser. A later `send` run
/// (headless or not) reuses the authenticated profile.
pub async fn execute(profile_dir: PathBuf) -> Result<()> {
    let config = Config {
        profile_dir,
        headless: false,
        ..Config::default()
    };

    println!("Opening WhatsApp Web; scan the QR code if prompted.");

    let session = Session::launch(config).await?;

    println!(
        "Authenticated session ready; profile stored at {}",
        session.config().profile_dir.display()
    );

    session.teardown().await;
    Ok(())
}
