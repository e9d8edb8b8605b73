use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wablast")]
#[command(about = "Send one message to a list of WhatsApp numbers through a controlled browser")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deliver the message to every number in the recipients file
    Send {
        /// File whose entire contents form the message body
        message: PathBuf,

        /// File with one raw recipient number per line
        recipients: PathBuf,

        /// Image to attach to every message
        #[arg(short, long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// Country calling code prefixed to every number
        #[arg(long, default_value = "91", value_name = "CC")]
        country_code: String,

        /// Browser profile directory; keeps the login across runs
        #[arg(long, default_value = ".wablast-profile", value_name = "DIR")]
        profile_dir: PathBuf,

        /// Run the browser without a visible window (profile must already
        /// be logged in, e.g. via `wablast login`)
        #[arg(long)]
        headless: bool,
    },

    /// Open the browser and wait for a QR scan, seeding the profile
    Login {
        /// Browser profile directory to seed
        #[arg(long, default_value = ".wablast-profile", value_name = "DIR")]
        profile_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_send_command() {
        let args = vec![
            "wablast",
            "send",
            "message.txt",
            "numbers.txt",
            "-i",
            "/tmp/pick.png",
            "--country-code",
            "44",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Send {
                message,
                recipients,
                image,
                country_code,
                profile_dir,
                headless,
            } => {
                assert_eq!(message, PathBuf::from("message.txt"));
                assert_eq!(recipients, PathBuf::from("numbers.txt"));
                assert_eq!(image, Some(PathBuf::from("/tmp/pick.png")));
                assert_eq!(country_code, "44");
                assert_eq!(profile_dir, PathBuf::from(".wablast-profile"));
                assert!(!headless);
            }
            _ => panic!("Expected Send command"),
        }
    }

    #[test]
    fn parse_send_defaults() {
        let args = vec!["wablast", "send", "message.txt", "numbers.txt"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Send {
                image,
                country_code,
                headless,
                ..
            } => {
                assert_eq!(image, None);
                assert_eq!(country_code, "91");
                assert!(!headless);
            }
            _ => panic!("Expected Send command"),
        }
    }

    #[test]
    fn parse_login_command() {
        let args = vec!["wablast", "login", "--profile-dir", "/tmp/profile"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Login { profile_dir } => {
                assert_eq!(profile_dir, PathBuf::from("/tmp/profile"));
            }
            _ => panic!("Expected Login command"),
        }
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(vec!["wablast", "-vv", "login"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn send_requires_both_input_files() {
        assert!(Cli::try_parse_from(vec!["wablast", "send", "message.txt"]).is_err());
    }

    #[test]
    fn invalid_command_fails() {
        assert!(Cli::try_parse_from(vec!["wablast", "broadcast"]).is_err());
    }
}
