/// Messages shown on the wall and the normalization that produces them
pub mod message;
/// Reversible encoding of a message into a token that can travel inside a URL
pub mod codec;
/// Reading a message out of a location and building shareable links
pub mod link;
/// Pure playback state machine: phases, timings and the published snapshots
pub mod sequencer;
/// Tokio driven sequencer publishing [sequencer::PlaybackState] snapshots.
/// Requires the 'player' feature and brings in the tokio dependency
#[cfg(feature = "player")]
pub mod player;

pub use codec::{decode, decode_token, encode, Decoded, ShareToken, TokenSource};
pub use message::{normalize, Message, ALPHABET_ROWS};
pub use sequencer::{PlaybackState, Timings};
