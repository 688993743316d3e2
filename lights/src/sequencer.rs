use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// PlaybackState is the snapshot the wall is rendered from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
    /// A run is in progress
    pub is_playing: bool,
    /// The letter that is lit right now
    pub active_letter: Option<char>,
    /// Every bulb on the wall flickers
    pub is_flickering_all: bool,
}

impl PlaybackState {
    pub const IDLE: PlaybackState = PlaybackState {
        is_playing: false,
        active_letter: None,
        is_flickering_all: false,
    };

    const fn playing(active_letter: Option<char>, is_flickering_all: bool) -> Self {
        PlaybackState {
            is_playing: true,
            active_letter,
            is_flickering_all,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }

    /// Whether the given letter should be drawn lit
    pub fn is_lit(&self, letter: char) -> bool {
        self.active_letter == Some(letter)
    }
}

/// Durations of the fixed steps of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timings {
    /// How long the whole wall flickers, before and after the message
    #[serde(rename = "flicker_ms", with = "millis")]
    pub flicker: Duration,
    /// Pause between the opening flicker and the first letter
    #[serde(rename = "pre_pause_ms", with = "millis")]
    pub pre_pause: Duration,
    /// How long each letter stays lit
    #[serde(rename = "letter_hold_ms", with = "millis")]
    pub letter_hold: Duration,
    /// Dark gap after each letter
    #[serde(rename = "letter_gap_ms", with = "millis")]
    pub letter_gap: Duration,
    /// Pause between the last letter gap and the closing flicker
    #[serde(rename = "post_pause_ms", with = "millis")]
    pub post_pause: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            flicker: Duration::from_millis(3000),
            pre_pause: Duration::from_millis(500),
            letter_hold: Duration::from_millis(800),
            letter_gap: Duration::from_millis(200),
            post_pause: Duration::from_millis(500),
        }
    }
}

impl Timings {
    /// Total length of a run spelling out `letters` letters
    pub fn run_length(&self, letters: usize) -> Duration {
        let per_letter = self.letter_hold + self.letter_gap;

        self.flicker * 2 + self.pre_pause + self.post_pause + per_letter * letters as u32
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Position of a run in the playback state machine.
///
/// Phases are strictly sequential: `PreFlicker`, `PrePause`, then `Letter(i)`
/// and `Gap(i)` for every letter, `PostPause`, `PostFlicker`, `Settle` and back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PreFlicker,
    PrePause,
    Letter(usize),
    Gap(usize),
    PostPause,
    PostFlicker,
    /// Flicker is off but the run has not yet released the wall
    Settle,
}

impl Phase {
    /// First phase of a run for the message, `Idle` when there is nothing to play
    pub fn first(message: &Message) -> Phase {
        if message.is_empty() {
            Phase::Idle
        } else {
            Phase::PreFlicker
        }
    }

    /// Successor of the phase for a message of `len` letters
    pub fn next(self, len: usize) -> Phase {
        match self {
            Phase::Idle => Phase::Idle,
            Phase::PreFlicker => Phase::PrePause,
            Phase::PrePause if len > 0 => Phase::Letter(0),
            Phase::PrePause => Phase::PostPause,
            Phase::Letter(idx) => Phase::Gap(idx),
            Phase::Gap(idx) if idx + 1 < len => Phase::Letter(idx + 1),
            Phase::Gap(_) => Phase::PostPause,
            Phase::PostPause => Phase::PostFlicker,
            Phase::PostFlicker => Phase::Settle,
            Phase::Settle => Phase::Idle,
        }
    }

    pub fn snapshot(self, message: &Message) -> PlaybackState {
        match self {
            Phase::Idle => PlaybackState::IDLE,
            Phase::PreFlicker | Phase::PostFlicker => PlaybackState::playing(None, true),
            Phase::Letter(idx) => PlaybackState::playing(message.letter(idx), false),
            Phase::PrePause | Phase::Gap(_) | Phase::PostPause | Phase::Settle => {
                PlaybackState::playing(None, false)
            }
        }
    }

    /// How long the run stays in this phase before moving on
    pub fn hold(self, timings: &Timings) -> Duration {
        match self {
            Phase::Idle | Phase::Settle => Duration::ZERO,
            Phase::PreFlicker | Phase::PostFlicker => timings.flicker,
            Phase::PrePause => timings.pre_pause,
            Phase::Letter(_) => timings.letter_hold,
            Phase::Gap(_) => timings.letter_gap,
            Phase::PostPause => timings.post_pause,
        }
    }
}

/// A published snapshot and the delay until the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub state: PlaybackState,
    pub hold: Duration,
}

/// Every snapshot a run of the message publishes, in order.
///
/// Phases that do not change the snapshot extend the delay of the previous
/// step instead of publishing it again. The last step is always [PlaybackState::IDLE].
/// An empty message has an empty schedule.
pub fn schedule(message: &Message, timings: &Timings) -> Vec<Step> {
    let mut steps: Vec<Step> = Vec::with_capacity(message.len() * 2 + 5);
    let mut phase = Phase::first(message);

    if phase == Phase::Idle {
        return steps;
    }

    loop {
        let state = phase.snapshot(message);
        let hold = phase.hold(timings);

        match steps.last_mut() {
            Some(last) if last.state == state => last.hold += hold,
            _ => steps.push(Step { state, hold }),
        }

        if phase == Phase::Idle {
            break steps;
        }

        phase = phase.next(message.len());
    }
}
