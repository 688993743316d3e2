use lights::{link, Message, PlaybackState};
use url::Url;

/// Blocking notices shown on top of the wall until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Submitted text had no letters in it
    InvalidMessage,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Notice::InvalidMessage => "Please enter a valid message with letters!",
        }
    }
}

/// Text waiting to be put on the clipboard by the ui.
///
/// Ids only grow, so the ui writes every request exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub id: u64,
    pub text: String,
}

/// State holds the state of the application
#[derive(Debug, Clone)]
pub struct State {
    /// Latest snapshot published by the sequencer
    pub playback: PlaybackState,
    /// Message last submitted or loaded from the location
    pub current_message: Option<Message>,
    /// Location the wall was opened with, rewritten on every submit
    pub location: Url,
    /// Notice blocking the wall, if any
    pub notice: Option<Notice>,
    /// The share link was copied a moment ago
    pub link_copied: bool,
    /// Latest copy of the share link the ui has not acknowledged yet
    pub copy_request: Option<CopyRequest>,
}

impl State {
    /// Initial state for the location, picking up the message it carries
    pub fn new(location: Url) -> Self {
        State {
            playback: PlaybackState::IDLE,
            current_message: link::message_from_location(&location),
            location,
            notice: None,
            link_copied: false,
            copy_request: None,
        }
    }

    /// Link to share the current message, derived from the location and the message
    pub fn share_url(&self) -> Option<Url> {
        link::share_url(&self.location, self.current_message.as_ref()?)
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing
    }

    /// Makes the message current and rewrites the location to point at it
    pub fn set_current_message(&mut self, message: Message) {
        self.location = link::rewrite_location(&self.location, &message);
        self.current_message = Some(message);
        // the previous link is no longer what is on the clipboard
        self.link_copied = false;
        self.copy_request = None;
    }

    pub fn apply_playback(&mut self, playback: PlaybackState) {
        self.playback = playback;
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Asks the ui to copy the share link, `false` when there is nothing to share
    pub fn request_copy(&mut self, id: u64) -> bool {
        let Some(share_url) = self.share_url() else {
            return false;
        };

        self.copy_request = Some(CopyRequest {
            id,
            text: String::from(share_url),
        });

        true
    }

    /// The ui wrote the request with the given id, stale ids are ignored
    pub fn acknowledge_copy(&mut self, id: u64) -> bool {
        if self.copy_request.as_ref().map(|request| request.id) != Some(id) {
            return false;
        }

        self.copy_request = None;
        self.mark_link_copied();

        true
    }

    pub fn mark_link_copied(&mut self) {
        self.link_copied = true;
    }

    pub fn clear_link_copied(&mut self) {
        self.link_copied = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(raw: &str) -> Url {
        link::parse_location(raw).unwrap()
    }

    #[test]
    fn test_new_state_picks_up_message_from_location() {
        let state = State::new(location("https://wall.example/app?msg=T0s%3D"));

        assert_eq!(state.current_message, Some(lights::normalize("OK")));
        assert_eq!(
            state.share_url().map(String::from),
            Some(String::from("https://wall.example/app?msg=T0s%3D"))
        );
        assert!(!state.is_playing());
    }

    #[test]
    fn test_new_state_without_message_has_nothing_to_share() {
        let state = State::new(location("https://wall.example/app"));

        assert_eq!(state.current_message, None);
        assert_eq!(state.share_url(), None);
    }

    #[test]
    fn test_set_current_message_rewrites_location() {
        let mut state = State::new(location("https://wall.example/app?ref=home#top"));
        state.mark_link_copied();

        state.set_current_message(lights::normalize("Hello, World!"));

        assert_eq!(
            state.location.as_str(),
            "https://wall.example/app?msg=SEVMTE9XT1JMRA%3D%3D"
        );
        assert!(!state.link_copied);
    }

    #[test]
    fn test_copy_request_lifecycle() {
        let mut state = State::new(location("https://wall.example/?msg=T0s%3D"));

        assert!(state.request_copy(1));
        assert_eq!(
            state.copy_request,
            Some(CopyRequest {
                id: 1,
                text: String::from("https://wall.example/?msg=T0s%3D"),
            })
        );

        // an older request is no longer what the share bar shows
        assert!(!state.acknowledge_copy(0));
        assert!(!state.link_copied);

        assert!(state.acknowledge_copy(1));
        assert!(state.link_copied);
        assert_eq!(state.copy_request, None);
    }

    #[test]
    fn test_nothing_to_copy_without_message() {
        let mut state = State::new(location("https://wall.example/"));

        assert!(!state.request_copy(1));
        assert_eq!(state.copy_request, None);
    }

    #[test]
    fn test_submit_drops_pending_copy() {
        let mut state = State::new(location("https://wall.example/?msg=T0s%3D"));
        state.request_copy(1);

        state.set_current_message(lights::normalize("hi"));

        assert_eq!(state.copy_request, None);
        assert!(!state.acknowledge_copy(1));
    }

    #[test]
    fn test_notice_lifecycle() {
        let mut state = State::new(location("https://wall.example/"));

        state.show_notice(Notice::InvalidMessage);
        assert_eq!(state.notice, Some(Notice::InvalidMessage));

        state.dismiss_notice();
        assert_eq!(state.notice, None);
    }
}
