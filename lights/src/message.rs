use std::fmt;

use serde::{Deserialize, Serialize};

/// Rows of the wall, top to bottom
pub const ALPHABET_ROWS: [&str; 3] = ["ABCDEFGH", "IJKLMNOPQ", "RSTUVWXYZ"];

/// [Message] is a sequence of uppercase latin letters (`A`-`Z`) to be spelled out on the wall.
///
/// The only way to build one is through [normalize], so every [Message] holds
/// letters only. An empty message is treated as "no message".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Message(String);

impl Message {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of letters in the message
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Letter at the given position, if any
    pub fn letter(&self, idx: usize) -> Option<char> {
        self.0.as_bytes().get(idx).map(|byte| char::from(*byte))
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    /// Returns `None` for an empty message, since it stands for no message at all
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Message {
    fn from(raw: String) -> Self {
        normalize(&raw)
    }
}

impl From<Message> for String {
    fn from(message: Message) -> Self {
        message.0
    }
}

impl PartialEq<str> for Message {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Message {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Converts free text into a [Message]: uppercases it, then drops everything that is not `A`-`Z`.
///
/// Uppercasing is the full unicode mapping, so `"straße"` becomes `"STRASSE"`.
pub fn normalize(raw: &str) -> Message {
    let letters = raw
        .to_uppercase()
        .chars()
        .filter(char::is_ascii_uppercase)
        .collect();

    Message(letters)
}
