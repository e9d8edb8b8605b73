use std::path::PathBuf;
use std::time::Duration;

/// DOM anchors on the WhatsApp Web client. These are the single point of
/// coupling to the remote page structure.
pub mod selectors {
    /// Chat-list pane; only present once the session is authenticated.
    pub const AUTHENTICATED: &str = "#pane-side";
    /// Conversation panel for a specific recipient, distinct from the app
    /// shell that loads even for invalid numbers.
    pub const CHAT_SURFACE: &str = "#main";
    pub const ATTACH_BUTTON: &str = "div[title=\"Attach\"]";
    pub const FILE_INPUT: &str = "input[type=\"file\"]";
    /// The compose box. Role and footer ancestry disambiguate it from the
    /// chat-search box, which is also contenteditable.
    pub const MESSAGE_INPUT: &str = "#main footer div[contenteditable=\"true\"][role=\"textbox\"]";
}

/// Fixed run policy: URLs, timeouts, pacing delays, and chunking. Timing
/// values are policy, not tunables; the CLI only overrides the file paths,
/// country code, profile directory, and headless flag.
#[derive(Debug, Clone)]
pub struct Config {
    /// Landing URL of the messaging web client.
    pub landing_url: String,
    /// Country calling code prefixed to every normalized number.
    pub country_code: String,
    /// Persistent browser profile directory; keeps authentication across runs.
    pub profile_dir: PathBuf,
    pub headless: bool,

    /// First wait for the authenticated marker after opening the client.
    pub bootstrap_timeout: Duration,
    /// Second wait for the same marker, covering a manual QR scan.
    pub login_grace: Duration,
    /// Wait for a recipient's chat surface after navigation.
    pub chat_timeout: Duration,
    /// Wait for the attach control, file input, and message input.
    pub input_timeout: Duration,

    /// Message text is injected in chunks of this many characters.
    pub chunk_size: usize,
    /// Pause between chunks so a slow page does not drop keystrokes.
    pub chunk_pause: Duration,
    /// Pause after the last chunk before the send key.
    pub settle_pause: Duration,
    /// Pause between attachment sub-steps (binding settling time).
    pub action_pause: Duration,
    /// Pause after each recipient, success or failure.
    pub recipient_pause: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            landing_url: "https://web.whatsapp.com".to_string(),
            country_code: "91".to_string(),
            profile_dir: PathBuf::from(".wablast-profile"),
            headless: false,
            bootstrap_timeout: Duration::from_secs(30),
            login_grace: Duration::from_secs(120),
            chat_timeout: Duration::from_secs(15),
            input_timeout: Duration::from_secs(10),
            chunk_size: 64,
            chunk_pause: Duration::from_millis(100),
            settle_pause: Duration::from_millis(500),
            action_pause: Duration::from_secs(1),
            recipient_pause: Duration::from_secs(1),
        }
    }
}

impl Config {
    /// Chat URL for one normalized recipient, composed from the landing URL,
    /// the country code, and the recipient digits.
    pub fn chat_url(&self, digits: &str) -> String {
        format!(
            "{}/send/?phone={}{}",
            self.landing_url, self.country_code, digits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_url_composes_prefix_and_digits() {
        let config = Config::default();
        assert_eq!(
            config.chat_url("7890123456"),
            "https://web.whatsapp.com/send/?phone=917890123456"
        );
    }
}
