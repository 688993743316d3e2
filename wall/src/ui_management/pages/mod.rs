use crossterm::event::KeyEvent;
use ratatui::{prelude::Backend, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};

use self::{notice_popup::NoticePopup, wall_page::WallPage};

use super::components::{Component, ComponentRender};

mod notice_popup;
mod wall_page;

/// AppRouter draws the wall and, while a notice is up, the popup above it
pub struct AppRouter {
    //
    wall_page: WallPage,
    notice_popup: NoticePopup,
}

impl AppRouter {
    fn get_focused_component(&self) -> &dyn Component {
        if self.notice_popup.is_shown() {
            &self.notice_popup
        } else {
            &self.wall_page
        }
    }

    fn get_focused_component_mut(&mut self) -> &mut dyn Component {
        if self.notice_popup.is_shown() {
            &mut self.notice_popup
        } else {
            &mut self.wall_page
        }
    }
}

impl Component for AppRouter {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            wall_page: WallPage::new(state, action_tx.clone()),
            notice_popup: NoticePopup::new(state, action_tx),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            wall_page: self.wall_page.move_with_state(state),
            notice_popup: self.notice_popup.move_with_state(state),
        }
    }

    // route all functions to the focused component, the popup blocks the wall
    fn name(&self) -> &str {
        self.get_focused_component().name()
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        self.get_focused_component_mut().handle_key_event(key)
    }
}

impl ComponentRender<()> for AppRouter {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: ()) {
        self.wall_page.render(frame, props);
        self.notice_popup.render(frame, props);
    }
}
