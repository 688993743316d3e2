use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use super::super::section::{
    usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    SectionActivation,
};
use crate::state_store::{action::Action, State};
use crate::ui_management::components::{Component, ComponentRender};

const NOTHING_TO_SHARE_MESSAGE: &str = "Display a message to get a link to share it";

struct Props {
    /// Link to the current message
    share_url: Option<String>,
    /// The link was just copied
    link_copied: bool,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            share_url: state.share_url().map(String::from),
            link_copied: state.link_copied,
        }
    }
}

/// ShareBar shows the link to the current message and copies it on demand
pub struct ShareBar {
    action_tx: UnboundedSender<Action>,
    props: Props,
}

impl ShareBar {
    fn copy_label(&self) -> &'static str {
        if self.props.link_copied {
            "✓ Link Copied!"
        } else {
            "Copy Link"
        }
    }
}

impl Component for ShareBar {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        ShareBar {
            action_tx,
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        ShareBar {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Share Link"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press || self.props.share_url.is_none() {
            return;
        }

        if matches!(key.code, KeyCode::Enter | KeyCode::Char('c')) {
            let _ = self.action_tx.send(Action::CopyShareLink);
        }
    }
}

impl SectionActivation for ShareBar {
    fn activate(&mut self) {}

    fn deactivate(&mut self) {}
}

pub struct RenderProps {
    pub area: Rect,
    pub border_color: Color,
}

impl ComponentRender<RenderProps> for ShareBar {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        let line = match self.props.share_url.as_ref() {
            Some(share_url) => {
                let label_style = if self.props.link_copied {
                    Style::default().fg(Color::LightGreen).bold()
                } else {
                    Style::default().bold()
                };

                Line::from(vec![
                    Span::styled(format!("[{}]", self.copy_label()), label_style),
                    " ".into(),
                    Span::from(share_url.clone()).underlined(),
                ])
            }
            None => Line::from(Span::from(NOTHING_TO_SHARE_MESSAGE).italic()),
        };

        let share_bar = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .fg(props.border_color)
                .title("Share"),
        );
        frame.render_widget(share_bar, props.area);
    }
}

impl HasUsageInfo for ShareBar {
    fn usage_info(&self) -> UsageInfo {
        if self.props.share_url.is_none() {
            UsageInfo {
                description: Some("There is no message to share yet.".into()),
                lines: vec![UsageInfoLine {
                    keys: vec!["Esc".into()],
                    description: "to cancel".into(),
                }],
            }
        } else {
            UsageInfo {
                description: Some("Copy the link, whoever opens it sees the message".into()),
                lines: vec![
                    UsageInfoLine {
                        keys: vec!["Esc".into()],
                        description: "to cancel".into(),
                    },
                    UsageInfoLine {
                        keys: vec!["Enter".into(), "c".into()],
                        description: "to copy the link".into(),
                    },
                ],
            }
        }
    }
}
