//! Message payload loading and chunked text splitting.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The literal message body for the whole run, optionally paired with an
/// image to attach. Loaded once, immutable afterwards.
#[derive(Debug, Clone)]
pub struct Payload {
    pub text: String,
    pub attachment: Option<PathBuf>,
}

impl Payload {
    /// Reads the message body from `message` and checks the optional
    /// attachment exists. Either file missing is fatal, before any session
    /// work starts.
    pub fn from_files(message: &Path, attachment: Option<&Path>) -> Result<Self> {
        let text = read_input(message)?;
        if let Some(image) = attachment {
            if !image.exists() {
                return Err(Error::MissingInput {
                    path: image.to_path_buf(),
                });
            }
        }
        Ok(Self {
            text,
            attachment: attachment.map(Path::to_path_buf),
        })
    }
}

/// Reads a whole input file, mapping a missing file to the fatal
/// [`Error::MissingInput`].
pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            Error::MissingInput {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(err)
        }
    })
}

/// Splits `text` into chunks of at most `size` characters, on char
/// boundaries. Concatenating the chunks in order reconstructs the text
/// exactly; an empty text yields no chunks.
pub fn chunks(text: &str, size: usize) -> impl Iterator<Item = &str> {
    let size = size.max(1);
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let split = rest
            .char_indices()
            .nth(size)
            .map(|(index, _)| index)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(split);
        rest = tail;
        Some(head)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_reconstruct_text_exactly() {
        let text = "a".repeat(150);
        let joined: String = chunks(&text, 64).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn chunk_count_is_ceil_of_length_over_size() {
        let text = "x".repeat(150);
        assert_eq!(chunks(&text, 64).count(), 3);
        assert_eq!(chunks("short", 64).count(), 1);
        assert_eq!(chunks("", 64).count(), 0);
    }

    #[test]
    fn chunks_split_on_char_boundaries() {
        let text = "héllo wörld ✓".repeat(10);
        let pieces: Vec<&str> = chunks(&text, 7).collect();
        assert!(pieces.iter().all(|piece| piece.chars().count() <= 7));
        assert_eq!(pieces.concat(), text);
    }

    #[test]
    fn missing_message_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("message.txt");
        match Payload::from_files(&absent, None) {
            Err(Error::MissingInput { path }) => assert_eq!(path, absent),
            other => panic!("expected MissingInput, got {other:?}"),
        }
    }

    #[test]
    fn missing_attachment_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let message = dir.path().join("message.txt");
        fs::write(&message, "hello").unwrap();
        let absent = dir.path().join("pick.png");
        assert!(matches!(
            Payload::from_files(&message, Some(&absent)),
            Err(Error::MissingInput { .. })
        ));
    }

    #[test]
    fn payload_loads_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let message = dir.path().join("message.txt");
        fs::write(&message, "line one\nline two\n").unwrap();
        let payload = Payload::from_files(&message, None).unwrap();
        assert_eq!(payload.text, "line one\nline two\n");
        assert!(payload.attachment.is_none());
    }
}
