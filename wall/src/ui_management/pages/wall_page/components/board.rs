use crossterm::event::KeyEvent;
use lights::{PlaybackState, ALPHABET_ROWS};
use rand::Rng;
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};
use crate::ui_management::components::{Component, ComponentRender};

const TITLE: &str = "VECNA LIVES";
const BULB_ON: &str = "●";
const BULB_OFF: &str = "○";
/// Bulb colors, cycled through the alphabet
const BULB_COLORS: [Color; 5] = [
    Color::LightRed,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightGreen,
    Color::LightMagenta,
];
/// Characters drawn in the middle of the wire between two bulbs, the wire sags a bit more every third gap
const WIRE_SAG: [char; 3] = ['─', '╌', '‿'];
/// wire, bulb and letter
const LINES_PER_ROW: u16 = 3;

/// Width of each letter slot and of the gaps between them, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSpacing {
    pub letter_width: u16,
    pub gap: u16,
}

impl BoardSpacing {
    /// Spacing which fits the widest row into the given width, the narrower the terminal the tighter the board
    pub fn for_width(width: u16) -> Self {
        let (letter_width, gap) = match width {
            0..=47 => (1, 1),
            48..=76 => (3, 2),
            _ => (5, 4),
        };

        BoardSpacing { letter_width, gap }
    }
}

fn bulb_color(letter: char) -> Color {
    let idx = (letter as usize).saturating_sub('A' as usize);

    BULB_COLORS[idx % BULB_COLORS.len()]
}

fn centered(content: &str, width: u16) -> String {
    format!("{:^width$}", content, width = width as usize)
}

/// The wire the bulbs of a row hang from
fn wire_line<'a>(row: &str, spacing: BoardSpacing) -> Line<'a> {
    let letters = row.chars().count();
    let mut wire = String::new();

    for idx in 0..letters {
        let slot: String = (0..spacing.letter_width)
            .map(|cell| if cell == spacing.letter_width / 2 { '┬' } else { '─' })
            .collect();
        wire.push_str(&slot);

        if idx + 1 < letters {
            let sag = WIRE_SAG[idx % WIRE_SAG.len()];
            wire.extend((0..spacing.gap).map(|cell| if cell == spacing.gap / 2 { sag } else { '─' }));
        }
    }

    Line::from(Span::styled(wire, Style::default().fg(Color::DarkGray)))
}

/// Bulb and letter lines of a row. `flicker_on` decides, bulb by bulb, which bulbs
/// are on while the whole wall flickers.
fn bulb_and_letter_lines<'a>(
    row: &str,
    spacing: BoardSpacing,
    playback: &PlaybackState,
    mut flicker_on: impl FnMut() -> bool,
) -> [Line<'a>; 2] {
    let gap = " ".repeat(spacing.gap as usize);
    let mut bulbs: Vec<Span> = Vec::new();
    let mut letters: Vec<Span> = Vec::new();

    for (idx, letter) in row.chars().enumerate() {
        if idx > 0 {
            bulbs.push(Span::raw(gap.clone()));
            letters.push(Span::raw(gap.clone()));
        }

        let is_on = playback.is_lit(letter) || (playback.is_flickering_all && flicker_on());
        let color = bulb_color(letter);
        let bulb = centered(if is_on { BULB_ON } else { BULB_OFF }, spacing.letter_width);
        let label = centered(&letter.to_string(), spacing.letter_width);

        if is_on {
            bulbs.push(Span::styled(bulb, Style::default().fg(color).bold()));
            letters.push(Span::styled(label, Style::default().fg(color).bold()));
        } else {
            bulbs.push(Span::styled(bulb, Style::default().fg(Color::DarkGray)));
            letters.push(Span::styled(label, Style::default().fg(Color::Gray)));
        }
    }

    [Line::from(bulbs), Line::from(letters)]
}

/// Every line of the board, rows separated by an empty line
fn board_lines<'a>(
    spacing: BoardSpacing,
    playback: &PlaybackState,
    mut flicker_on: impl FnMut() -> bool,
) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(ALPHABET_ROWS.len() * (LINES_PER_ROW as usize + 1));

    for (idx, row) in ALPHABET_ROWS.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }

        lines.push(wire_line(row, spacing));
        lines.extend(bulb_and_letter_lines(row, spacing, playback, &mut flicker_on));
    }

    lines
}

struct Props {
    playback: PlaybackState,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            playback: state.playback,
        }
    }
}

/// Board draws the alphabet wall from the latest playback snapshot
pub struct Board {
    props: Props,
}

impl Component for Board {
    fn new(state: &State, _action_tx: UnboundedSender<Action>) -> Self {
        Board {
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        Board {
            props: Props::from(state),
        }
    }

    fn name(&self) -> &str {
        "Board"
    }

    fn handle_key_event(&mut self, _key: KeyEvent) {}
}

pub struct RenderProps {
    pub area: Rect,
}

impl ComponentRender<RenderProps> for Board {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::from(TITLE).bold().fg(Color::LightRed))
            .title_alignment(Alignment::Center);
        let inner = block.inner(props.area);

        let spacing = BoardSpacing::for_width(inner.width);
        let mut rng = rand::thread_rng();
        let mut lines = board_lines(spacing, &self.props.playback, || rng.gen_bool(0.5));

        // vertically center the rows inside the board
        let content_height = lines.len() as u16;
        let top_padding = inner.height.saturating_sub(content_height) / 2;
        let mut padded = vec![Line::default(); top_padding as usize];
        padded.append(&mut lines);

        let board = Paragraph::new(padded)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(board, props.area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn playing(active_letter: Option<char>, is_flickering_all: bool) -> PlaybackState {
        PlaybackState {
            is_playing: true,
            active_letter,
            is_flickering_all,
        }
    }

    #[test]
    fn test_spacing_breakpoints() {
        assert_eq!(BoardSpacing::for_width(30), BoardSpacing { letter_width: 1, gap: 1 });
        assert_eq!(BoardSpacing::for_width(48), BoardSpacing { letter_width: 3, gap: 2 });
        assert_eq!(BoardSpacing::for_width(77), BoardSpacing { letter_width: 5, gap: 4 });
    }

    #[test]
    fn test_widest_row_fits_at_every_breakpoint() {
        for width in [17, 47, 48, 76, 77, 200] {
            let spacing = BoardSpacing::for_width(width);

            let row_width = plain(&wire_line("IJKLMNOPQ", spacing)).chars().count();

            assert!(row_width <= width as usize, "row does not fit in {width}");
        }
    }

    #[test]
    fn test_only_active_letter_is_lit() {
        let spacing = BoardSpacing { letter_width: 1, gap: 1 };
        let [bulbs, letters] = bulb_and_letter_lines("ABC", spacing, &playing(Some('B'), false), || true);

        assert_eq!(plain(&bulbs), "○ ● ○");
        assert_eq!(plain(&letters), "A B C");
    }

    #[test]
    fn test_flicker_follows_the_coin() {
        let spacing = BoardSpacing { letter_width: 3, gap: 2 };
        let mut coin = [true, false, true].into_iter();
        let [bulbs, _] = bulb_and_letter_lines("XYZ", spacing, &playing(None, true), || {
            coin.next().unwrap()
        });

        assert_eq!(plain(&bulbs), " ●    ○    ● ");
    }

    #[test]
    fn test_idle_wall_is_dark() {
        let spacing = BoardSpacing::for_width(100);
        let lines = board_lines(spacing, &PlaybackState::IDLE, || true);

        assert_eq!(lines.len(), 3 * 3 + 2);
        assert!(lines.iter().all(|line| !plain(line).contains(BULB_ON)));
    }

    #[test]
    fn test_wire_spans_the_row() {
        let spacing = BoardSpacing { letter_width: 3, gap: 2 };
        let wire = plain(&wire_line("ABCD", spacing));
        let [bulbs, _] = bulb_and_letter_lines("ABCD", spacing, &PlaybackState::IDLE, || false);

        assert_eq!(wire.chars().count(), plain(&bulbs).chars().count());
        assert_eq!(wire, "─┬────┬──╌─┬──‿─┬─");
    }
}
