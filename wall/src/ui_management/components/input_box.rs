use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    prelude::{Backend, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};

use super::{Component, ComponentRender};

/// Single line text editor. The cursor is counted in chars, not bytes,
/// so anything can be typed even though only letters end up on the wall.
pub struct InputBox {
    /// Current value of the input box
    text: String,
    /// Position of cursor in the editor area, in chars
    cursor_position: usize,
}

impl InputBox {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn reset(&mut self) {
        self.cursor_position = 0;
        self.text.clear();
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }

    fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        self.cursor_position = self.cursor_position.saturating_add(1).min(self.char_count());
    }

    fn enter_char(&mut self, new_char: char) {
        let byte_idx = self.byte_index(self.cursor_position);
        self.text.insert(byte_idx, new_char);

        self.move_cursor_right();
    }

    fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }

        let byte_idx = self.byte_index(self.cursor_position - 1);
        self.text.remove(byte_idx);
        self.move_cursor_left();
    }
}

impl Component for InputBox {
    fn new(_state: &State, _action_tx: UnboundedSender<Action>) -> Self {
        Self {
            text: String::new(),
            cursor_position: 0,
        }
    }

    fn move_with_state(self, _state: &State) -> Self
    where
        Self: Sized,
    {
        Self { ..self }
    }

    fn name(&self) -> &str {
        "Input Box"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char(to_insert) => {
                self.enter_char(to_insert);
            }
            KeyCode::Backspace => {
                self.delete_char();
            }
            KeyCode::Left => {
                self.move_cursor_left();
            }
            KeyCode::Right => {
                self.move_cursor_right();
            }
            KeyCode::Home => {
                self.cursor_position = 0;
            }
            KeyCode::End => {
                self.cursor_position = self.char_count();
            }
            _ => {}
        }
    }
}

pub struct RenderProps {
    pub title: String,
    pub placeholder: &'static str,
    pub area: Rect,
    pub border_color: Color,
    pub show_cursor: bool,
    pub disabled: bool,
}

impl ComponentRender<RenderProps> for InputBox {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        let (text, style) = match (self.text.is_empty(), props.disabled) {
            (true, _) => (props.placeholder, Style::default().fg(Color::DarkGray).italic()),
            (false, true) => (self.text.as_str(), Style::default().fg(Color::DarkGray)),
            (false, false) => (self.text.as_str(), Style::default().fg(Color::Yellow)),
        };

        let input = Paragraph::new(text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .fg(props.border_color)
                .title(props.title),
        );
        frame.render_widget(input, props.area);

        if props.show_cursor && !props.disabled {
            frame.set_cursor(
                // one cell in from the left border
                props.area.x + self.cursor_position as u16 + 1,
                // Move one line down, from the border to the input line
                props.area.y + 1,
            )
        }
    }
}
