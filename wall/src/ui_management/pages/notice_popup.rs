use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};
use crate::ui_management::components::{Component, ComponentRender};

const POPUP_WIDTH_PERCENT: u16 = 60;
const POPUP_HEIGHT: u16 = 5;

struct Props {
    /// Text of the notice blocking the wall
    text: Option<&'static str>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            text: state.notice.as_ref().map(|notice| notice.text()),
        }
    }
}

/// NoticePopup blocks the wall with the current notice until any key dismisses it
pub struct NoticePopup {
    action_tx: UnboundedSender<Action>,
    props: Props,
}

impl NoticePopup {
    pub fn is_shown(&self) -> bool {
        self.props.text.is_some()
    }
}

impl Component for NoticePopup {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        NoticePopup {
            action_tx,
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        NoticePopup {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Notice"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press || !self.is_shown() {
            return;
        }

        let _ = self.action_tx.send(Action::DismissNotice);
    }
}

/// Rect of the given width percentage and height, centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl ComponentRender<()> for NoticePopup {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let Some(text) = self.props.text else {
            return;
        };

        let area = centered_rect(POPUP_WIDTH_PERCENT, POPUP_HEIGHT, frame.size());
        let popup = Paragraph::new(vec![
            Line::from(Span::from(text).bold()),
            Line::from(Span::from("press any key to continue").italic().fg(Color::DarkGray)),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .fg(Color::LightRed)
                .title("Oops"),
        );

        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc;

    use super::*;
    use crate::state_store::Notice;

    fn state() -> State {
        State::new(lights::link::parse_location("https://wall.example/").unwrap())
    }

    #[test]
    fn test_any_key_dismisses() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut noticed = state();
        noticed.show_notice(Notice::InvalidMessage);

        let mut popup = NoticePopup::new(&noticed, action_tx);
        assert!(popup.is_shown());

        popup.handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(matches!(action_rx.try_recv(), Ok(Action::DismissNotice)));
    }

    #[test]
    fn test_hidden_without_notice() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut popup = NoticePopup::new(&state(), action_tx);

        popup.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(!popup.is_shown());
        assert!(action_rx.try_recv().is_err());
    }

    #[test]
    fn test_centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 80, 3);
        let popup = centered_rect(60, 5, area);

        assert_eq!(popup, Rect::new(16, 0, 48, 3));
    }

    #[test]
    fn test_centered_rect_on_very_wide_terminal() {
        // built by hand, Rect::new would clamp the area
        let area = Rect {
            x: 0,
            y: 0,
            width: 2000,
            height: 40,
        };
        let popup = centered_rect(60, 5, area);

        assert_eq!(popup, Rect::new(400, 17, 1200, 5));
    }
}
