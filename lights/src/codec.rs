use std::fmt;

use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use serde::{Deserialize, Serialize};

use crate::message::{normalize, Message};

/// Lenient decoder: accepts missing padding and non-zero trailing bits,
/// the same leeway browsers give to base64 found in links.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// [ShareToken] is the text form of a [Message] that travels in the `msg` query parameter.
///
/// It is standard, padded base64 of the message letters. It still needs
/// percent-encoding when placed in a URL, since `+`, `/` and `=` are reserved there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareToken(String);

impl ShareToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShareToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which interpretation of a token produced the decoded message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// The token was valid base64
    Encoded,
    /// The token was not valid base64 and was read as a legacy plaintext link
    Plaintext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub message: Message,
    pub source: TokenSource,
}

pub fn encode(message: &Message) -> ShareToken {
    ShareToken(STANDARD.encode(message.as_str()))
}

/// Decodes a token into a [Message], never failing.
///
/// Tokens which are not valid base64 are treated as plaintext, both results are normalized.
pub fn decode(token: &str) -> Message {
    decode_token(token).message
}

/// Same as [decode] but also reports which interpretation was used.
///
/// A token that happens to be valid base64 is always read as base64, even
/// when it was meant as a plaintext legacy link.
pub fn decode_token(token: &str) -> Decoded {
    match forgiving_decode(token) {
        Some(bytes) => {
            // bytes are taken as latin-1, one char per byte
            let text: String = bytes.into_iter().map(char::from).collect();

            Decoded {
                message: normalize(&text),
                source: TokenSource::Encoded,
            }
        }
        None => {
            tracing::debug!(token, "token is not base64, reading it as plaintext");

            Decoded {
                message: normalize(token),
                source: TokenSource::Plaintext,
            }
        }
    }
}

fn forgiving_decode(token: &str) -> Option<Vec<u8>> {
    let mut data: String = token
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' '))
        .collect();

    // padding is only stripped from complete quads, "QQ=" is invalid
    if data.len() % 4 == 0 {
        if data.ends_with("==") {
            data.truncate(data.len() - 2);
        } else if data.ends_with('=') {
            data.truncate(data.len() - 1);
        }
    }

    FORGIVING.decode(data).ok()
}
