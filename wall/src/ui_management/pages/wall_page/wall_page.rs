use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};

use super::{
    components::{
        board::{self, Board},
        message_input::{self, MessageInput},
        share_bar::{self, ShareBar},
    },
    section::{
        usage::{widget_usage_to_text, HasUsageInfo, UsageInfo, UsageInfoLine},
        SectionActivation,
    },
};
use crate::ui_management::components::{Component, ComponentRender};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Section {
    MessageInput,
    ShareBar,
}

impl Section {
    const ALL: [Section; 2] = [Section::MessageInput, Section::ShareBar];

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or_default()
    }

    fn next(self) -> Section {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Section {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

struct Props {
    /// Where the wall is, as an address bar would show it
    location: String,
    /// A run is in progress
    is_playing: bool,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            location: state.location.to_string(),
            is_playing: state.is_playing(),
        }
    }
}

const DEFAULT_HOVERED_SECTION: Section = Section::MessageInput;

/// WallPage lays out the board, the message input and the share bar
pub struct WallPage {
    /// Action sender
    pub action_tx: UnboundedSender<Action>,
    /// State Mapped WallPage Props
    props: Props,
    // Internal State
    /// Currently active section, handling input
    pub active_section: Option<Section>,
    /// Section that is currently hovered
    pub last_hovered_section: Section,
    // Child Components
    pub board: Board,
    pub message_input: MessageInput,
    pub share_bar: ShareBar,
}

impl WallPage {
    fn get_component_for_section(&self, section: Section) -> &dyn Component {
        match section {
            Section::MessageInput => &self.message_input,
            Section::ShareBar => &self.share_bar,
        }
    }

    fn get_component_for_section_mut(&mut self, section: Section) -> &mut dyn Component {
        match section {
            Section::MessageInput => &mut self.message_input,
            Section::ShareBar => &mut self.share_bar,
        }
    }

    fn get_section_activation_for_section(&mut self, section: Section) -> &mut dyn SectionActivation {
        match section {
            Section::MessageInput => &mut self.message_input,
            Section::ShareBar => &mut self.share_bar,
        }
    }

    fn calculate_border_color(&self, section: Section) -> Color {
        match (self.active_section, self.last_hovered_section) {
            (Some(active_section), _) if active_section == section => Color::Yellow,
            (_, last_hovered_section) if last_hovered_section == section => Color::Blue,
            _ => Color::Reset,
        }
    }

    fn activate_section(&mut self, section: Section) {
        self.active_section = Some(section);
        self.get_section_activation_for_section(section).activate();
    }

    fn disable_section(&mut self, section: Section) {
        self.get_section_activation_for_section(section).deactivate();

        self.active_section = None;
    }
}

impl Component for WallPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        WallPage {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            // internal component state
            active_section: None,
            last_hovered_section: DEFAULT_HOVERED_SECTION,
            // child components
            board: Board::new(state, action_tx.clone()),
            message_input: MessageInput::new(state, action_tx.clone()),
            share_bar: ShareBar::new(state, action_tx),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        WallPage {
            props: Props::from(state),
            // propogate the update to the child components
            board: self.board.move_with_state(state),
            message_input: self.message_input.move_with_state(state),
            share_bar: self.share_bar.move_with_state(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Wall Page"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.active_section {
            None => match key.code {
                KeyCode::Char('e') | KeyCode::Enter => {
                    self.activate_section(self.last_hovered_section);
                }
                KeyCode::Left | KeyCode::Up => {
                    self.last_hovered_section = self.last_hovered_section.previous()
                }
                KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
                    self.last_hovered_section = self.last_hovered_section.next()
                }
                KeyCode::Char('q') => {
                    let _ = self.action_tx.send(Action::Exit);
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    let _ = self.action_tx.send(Action::Exit);
                }
                _ => {}
            },
            Some(section) => {
                // ctrl-c quits from anywhere, the terminal is in raw mode
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    let _ = self.action_tx.send(Action::Exit);
                    return;
                }

                if key.code == KeyCode::Esc {
                    self.disable_section(section);
                    return;
                }

                self.get_component_for_section_mut(section)
                    .handle_key_event(key);
            }
        }
    }
}

impl ComponentRender<()> for WallPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let [container_address, container_board, container_input, container_share, container_usage] =
            *Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Min(13),
                        Constraint::Length(3),
                        Constraint::Length(3),
                        Constraint::Length(5),
                    ]
                    .as_ref(),
                )
                .split(frame.size())
        else {
            panic!("The main layout should have 5 chunks")
        };

        let status = if self.props.is_playing {
            Span::from("● playing").fg(Color::LightRed).bold()
        } else {
            Span::from("○ idle").fg(Color::DarkGray)
        };
        let address_bar = Paragraph::new(Line::from(vec![
            status,
            "  ".into(),
            Span::from(self.props.location.as_str()),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Location"));
        frame.render_widget(address_bar, container_address);

        self.board.render(
            frame,
            board::RenderProps {
                area: container_board,
            },
        );

        self.message_input.render(
            frame,
            message_input::RenderProps {
                area: container_input,
                border_color: self.calculate_border_color(Section::MessageInput),
                show_cursor: self.active_section == Some(Section::MessageInput),
            },
        );

        self.share_bar.render(
            frame,
            share_bar::RenderProps {
                area: container_share,
                border_color: self.calculate_border_color(Section::ShareBar),
            },
        );

        let usage = Paragraph::new(widget_usage_to_text(self.usage_info()))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Usage"));
        frame.render_widget(usage, container_usage);
    }
}

impl HasUsageInfo for WallPage {
    fn usage_info(&self) -> UsageInfo {
        if let Some(section) = self.active_section {
            let handler: &dyn HasUsageInfo = match section {
                Section::MessageInput => &self.message_input,
                Section::ShareBar => &self.share_bar,
            };

            handler.usage_info()
        } else {
            UsageInfo {
                description: Some("Select a widget".into()),
                lines: vec![
                    UsageInfoLine {
                        keys: vec!["q".into()],
                        description: "to exit".into(),
                    },
                    UsageInfoLine {
                        keys: vec!["←".into(), "→".into()],
                        description: "to hover widgets".into(),
                    },
                    UsageInfoLine {
                        keys: vec!["e".into(), "Enter".into()],
                        description: format!(
                            "to activate {}",
                            self.get_component_for_section(self.last_hovered_section)
                                .name()
                        ),
                    },
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn press(page: &mut WallPage, code: KeyCode) {
        page.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn page() -> (WallPage, mpsc::UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let state = State::new(lights::link::parse_location("https://wall.example/").unwrap());

        (WallPage::new(&state, action_tx), action_rx)
    }

    #[test]
    fn test_section_cycling() {
        assert_eq!(Section::MessageInput.next(), Section::ShareBar);
        assert_eq!(Section::ShareBar.next(), Section::MessageInput);
        assert_eq!(Section::MessageInput.previous(), Section::ShareBar);
    }

    #[test]
    fn test_typing_goes_to_the_active_section() {
        let (mut page, mut action_rx) = page();

        press(&mut page, KeyCode::Char('e'));
        assert_eq!(page.active_section, Some(Section::MessageInput));

        // 'q' is text while typing, not quit
        for c in "quit".chars() {
            press(&mut page, KeyCode::Char(c));
        }
        press(&mut page, KeyCode::Enter);

        assert!(matches!(
            action_rx.try_recv(),
            Ok(Action::SubmitMessage { raw }) if raw == "quit"
        ));

        press(&mut page, KeyCode::Esc);
        assert_eq!(page.active_section, None);
        assert_eq!(page.message_input.input_box.text(), "");

        press(&mut page, KeyCode::Char('q'));
        assert!(matches!(action_rx.try_recv(), Ok(Action::Exit)));
    }

    #[test]
    fn test_hovering_share_bar() {
        let (mut page, _action_rx) = page();

        press(&mut page, KeyCode::Right);
        assert_eq!(page.last_hovered_section, Section::ShareBar);
        assert_eq!(page.calculate_border_color(Section::ShareBar), Color::Blue);

        press(&mut page, KeyCode::Enter);
        assert_eq!(page.active_section, Some(Section::ShareBar));
        assert_eq!(page.calculate_border_color(Section::ShareBar), Color::Yellow);
    }
}
