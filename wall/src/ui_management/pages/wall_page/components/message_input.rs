use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    prelude::{Backend, Rect},
    style::Color,
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use super::super::section::usage::{HasUsageInfo, UsageInfo, UsageInfoLine};
use crate::ui_management::components::{
    input_box::{self, InputBox},
    Component, ComponentRender,
};
use crate::{
    state_store::{action::Action, State},
    ui_management::pages::wall_page::section::SectionActivation,
};

const PLACEHOLDER: &str = "Type your message here...";

struct Props {
    /// A run is in progress, the input is disabled until it is over
    is_playing: bool,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Self {
            is_playing: state.is_playing(),
        }
    }
}

/// MessageInput takes the free text which is spelled out on the wall
pub struct MessageInput {
    action_tx: UnboundedSender<Action>,
    /// State Mapped MessageInput Props
    props: Props,
    // Internal State for the Component
    pub input_box: InputBox,
}

impl MessageInput {
    fn submit_message(&mut self) {
        // blank text is still submitted, the store answers it with a notice
        let _ = self.action_tx.send(Action::SubmitMessage {
            raw: String::from(self.input_box.text()),
        });
    }

    /// Label of the submit hint, following the playback
    pub fn submit_label(&self) -> &'static str {
        if self.props.is_playing {
            "Playing..."
        } else {
            "Display Message"
        }
    }
}

impl Component for MessageInput {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            //
            input_box: InputBox::new(state, action_tx),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        Self {
            props: Props::from(state),
            input_box: self.input_box.move_with_state(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Message Input"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press || self.props.is_playing {
            return;
        }

        if key.code == KeyCode::Enter {
            self.submit_message();
        } else {
            self.input_box.handle_key_event(key);
        }
    }
}

impl SectionActivation for MessageInput {
    fn activate(&mut self) {}

    /// Leaving the input cancels whatever was typed
    fn deactivate(&mut self) {
        self.input_box.reset();
    }
}

pub struct RenderProps {
    pub area: Rect,
    pub border_color: Color,
    pub show_cursor: bool,
}

impl ComponentRender<RenderProps> for MessageInput {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        self.input_box.render(
            frame,
            input_box::RenderProps {
                title: format!("Message ({})", self.submit_label()),
                placeholder: PLACEHOLDER,
                area: props.area,
                border_color: props.border_color,
                show_cursor: props.show_cursor,
                disabled: self.props.is_playing,
            },
        )
    }
}

impl HasUsageInfo for MessageInput {
    fn usage_info(&self) -> UsageInfo {
        if self.props.is_playing {
            UsageInfo {
                description: Some("The wall is busy, wait for the message to finish.".into()),
                lines: vec![UsageInfoLine {
                    keys: vec!["Esc".into()],
                    description: "to cancel".into(),
                }],
            }
        } else {
            UsageInfo {
                description: Some("Type a message, only its letters light up".into()),
                lines: vec![
                    UsageInfoLine {
                        keys: vec!["Esc".into()],
                        description: "to cancel and clear the text".into(),
                    },
                    UsageInfoLine {
                        keys: vec!["Enter".into()],
                        description: "to display the message".into(),
                    },
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use lights::PlaybackState;
    use tokio::sync::mpsc;

    use super::*;

    fn state() -> State {
        State::new(lights::link::parse_location("https://wall.example/").unwrap())
    }

    fn press(component: &mut MessageInput, code: KeyCode) {
        component.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_enter_submits_raw_text() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut input = MessageInput::new(&state(), action_tx);

        for c in "Hi!".chars() {
            press(&mut input, KeyCode::Char(c));
        }
        press(&mut input, KeyCode::Enter);

        assert!(matches!(
            action_rx.try_recv(),
            Ok(Action::SubmitMessage { raw }) if raw == "Hi!"
        ));
        // the text stays in place after submitting
        assert_eq!(input.input_box.text(), "Hi!");
    }

    #[test]
    fn test_input_is_disabled_while_playing() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut playing = state();
        playing.apply_playback(PlaybackState {
            is_playing: true,
            active_letter: None,
            is_flickering_all: true,
        });
        let mut input = MessageInput::new(&state(), action_tx).move_with_state(&playing);

        press(&mut input, KeyCode::Char('x'));
        press(&mut input, KeyCode::Enter);

        assert_eq!(input.input_box.text(), "");
        assert!(action_rx.try_recv().is_err());
        assert_eq!(input.submit_label(), "Playing...");
    }

    #[test]
    fn test_deactivate_clears_the_text() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let mut input = MessageInput::new(&state(), action_tx);

        input.activate();
        for c in "Hi".chars() {
            press(&mut input, KeyCode::Char(c));
        }
        input.deactivate();

        assert_eq!(input.input_box.text(), "");
    }
}
