use std::{
    io::{self, Stdout},
    time::Duration,
};

use anyhow::Context;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::{
    broadcast,
    mpsc::{self, UnboundedReceiver},
};
use tokio_stream::StreamExt;

use crate::{
    clipboard::Clipboard,
    state_store::{action::Action, State},
    ui_management::components::{Component, ComponentRender},
    Interrupted,
};

use super::pages::AppRouter;

/// Redraws at least this often, which is also the pace of the flicker
const RENDERING_TICK_RATE: Duration = Duration::from_millis(120);

pub struct UiManager {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl UiManager {
    pub fn new() -> (Self, UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        (Self { action_tx }, action_rx)
    }

    /// The terminal stopped sending events, the store has to stop along with the ui
    fn input_closed(&self) -> Interrupted {
        let _ = self.action_tx.send(Action::Exit);

        Interrupted::UserInt
    }

    /// Puts a pending copy request on the clipboard through the terminal the ui draws on
    fn sync_clipboard<W: io::Write>(&self, clipboard: &mut Clipboard, out: &mut W, state: &State) {
        match clipboard.write_pending(out, state.copy_request.as_ref()) {
            Ok(Some(id)) => {
                let _ = self.action_tx.send(Action::LinkCopied { id });
            }
            Ok(None) => (),
            Err(err) => tracing::error!(%err, "failed to copy the share link"),
        }
    }

    pub async fn main_loop(
        self,
        mut state_rx: UnboundedReceiver<State>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        // consume the first state to initialize the ui app
        let mut app_router = {
            let state = state_rx
                .recv()
                .await
                .context("the state store closed before sending the initial state")?;

            AppRouter::new(&state, self.action_tx.clone())
        };

        let mut terminal = setup_terminal()?;
        let mut ticker = tokio::time::interval(RENDERING_TICK_RATE);
        let mut crossterm_events = EventStream::new();
        let mut clipboard = Clipboard::default();

        let result: anyhow::Result<Interrupted> = loop {
            tokio::select! {
                // Tick to redraw the flickering bulbs every N milliseconds
                _ = ticker.tick() => (),
                // Catch and handle crossterm events
                maybe_event = crossterm_events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        app_router.handle_key_event(key);
                    },
                    None => break Ok(self.input_closed()),
                    _ => (),
                },
                // Handle state updates
                Some(state) = state_rx.recv() => {
                    self.sync_clipboard(&mut clipboard, terminal.backend_mut(), &state);
                    app_router = app_router.move_with_state(&state);
                },
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break Ok(interrupted);
                }
            }

            if let Err(err) = terminal
                .draw(|frame| app_router.render(frame, ()))
                .context("could not render to the terminal")
            {
                break Err(err);
            }
        };

        restore_terminal(&mut terminal)?;

        result
    }
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();

    enable_raw_mode()?;

    // no mouse capture, the terminal keeps its own text selection for the share link
    execute!(stdout, EnterAlternateScreen)?;

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(terminal.show_cursor()?)
}
