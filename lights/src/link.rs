use url::Url;

use crate::{
    codec::{decode_token, encode, TokenSource},
    message::Message,
};

/// Query parameter carrying the [crate::codec::ShareToken]
pub const MESSAGE_PARAM: &str = "msg";

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("invalid location {location:?}")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },
    #[error("location {0:?} can not carry a query string")]
    CannotBeABase(String),
}

/// Parses a location which links can be built upon
pub fn parse_location(raw: &str) -> Result<Url, LinkError> {
    let location = Url::parse(raw).map_err(|source| LinkError::InvalidLocation {
        location: String::from(raw),
        source,
    })?;

    if location.cannot_be_a_base() {
        return Err(LinkError::CannotBeABase(String::from(raw)));
    }

    Ok(location)
}

/// Raw value of the first `msg` parameter, form-decoded
pub fn token_from_location(location: &Url) -> Option<String> {
    location
        .query_pairs()
        .find(|(key, _)| key == MESSAGE_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Reads the message a location points at. Returns `None` when there is no
/// `msg` parameter or when it decodes to an empty message.
pub fn message_from_location(location: &Url) -> Option<Message> {
    let token = token_from_location(location)?;
    let decoded = decode_token(&token);

    if decoded.source == TokenSource::Plaintext {
        tracing::info!(%location, "loaded a legacy plaintext link");
    }

    decoded.message.non_empty()
}

/// The location after submitting a message: same path, query replaced by `msg`, no fragment
pub fn rewrite_location(location: &Url, message: &Message) -> Url {
    let mut rewritten = location.clone();
    rewritten.set_fragment(None);
    rewritten
        .query_pairs_mut()
        .clear()
        .append_pair(MESSAGE_PARAM, encode(message).as_str());

    rewritten
}

/// Full link to share: origin and path of the location with the encoded message.
///
/// Returns `None` for an empty message, there is nothing to share.
pub fn share_url(location: &Url, message: &Message) -> Option<Url> {
    if message.is_empty() {
        return None;
    }

    let mut url = rewrite_location(location, message);
    // origin does not include credentials, setters only fail for cannot-be-a-base urls
    let _ = url.set_username("");
    let _ = url.set_password(None);

    Some(url)
}
