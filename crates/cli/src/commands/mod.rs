mod login;
mod send;

use wablast::Result;

use crate::cli::Commands;

pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Send {
            message,
            recipients,
            image,
            country_code,
            profile_dir,
            headless,
        } => {
            send::execute(
                &message,
                &recipients,
                image.as_deref(),
                country_code,
                profile_dir,
                headless,
            )
            .await
        }
        Commands::Login { profile_dir } => login::execute(profile_dir).await,
    }
}
