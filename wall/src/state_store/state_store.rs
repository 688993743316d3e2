use std::time::Duration;

use lights::{normalize, player::Sequencer, Timings};
use tokio::{
    sync::{
        broadcast,
        mpsc::{self, UnboundedReceiver, UnboundedSender},
    },
    task::JoinHandle,
    time::Instant,
};
use url::Url;

use crate::{Interrupted, Terminator};

use super::{action::Action, Notice, State};

/// How long the share bar reads "Link Copied!" after a copy
const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Settings of the playback side of the store
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackOptions {
    pub timings: Timings,
    /// Wait before playing the message found in the location
    pub autoplay_delay: Duration,
}

pub struct StateStore {
    state_tx: UnboundedSender<State>,
    location: Url,
    options: PlaybackOptions,
}

impl StateStore {
    pub fn new(location: Url, options: PlaybackOptions) -> (Self, UnboundedReceiver<State>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<State>();

        (
            StateStore {
                state_tx,
                location,
                options,
            },
            state_rx,
        )
    }
}

impl StateStore {
    pub async fn main_loop(
        self,
        mut terminator: Terminator,
        mut action_rx: UnboundedReceiver<Action>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        let (sequencer, mut playback_rx) = Sequencer::new(self.options.timings);
        let mut state = State::new(self.location.clone());
        let mut active_run: Option<JoinHandle<()>> = None;

        // the initial state once
        self.state_tx.send(state.clone())?;

        // the location is read once, its message plays without any user action
        let mut pending_autoplay = state.current_message.clone();
        let autoplay = tokio::time::sleep(self.options.autoplay_delay);
        tokio::pin!(autoplay);

        let copy_feedback = tokio::time::sleep(Duration::ZERO);
        tokio::pin!(copy_feedback);
        let mut next_copy_id: u64 = 0;

        let result = loop {
            tokio::select! {
                _ = &mut autoplay, if pending_autoplay.is_some() => {
                    if let Some(message) = pending_autoplay.take() {
                        tracing::info!(%message, "playing the message from the location");
                        active_run = sequencer.play(&message).or(active_run);
                    }
                },
                // Handle the snapshots published by the sequencer
                Some(playback) = playback_rx.recv() => {
                    state.apply_playback(playback);
                },
                // Handle the actions coming from the UI
                Some(action) = action_rx.recv() => match action {
                    Action::SubmitMessage { raw } => {
                        if state.is_playing() {
                            tracing::debug!("message submitted while playing, ignoring it");
                        } else if let Some(message) = normalize(&raw).non_empty() {
                            match sequencer.play(&message) {
                                Some(run) => {
                                    state.set_current_message(message);
                                    active_run = Some(run);
                                },
                                None => tracing::debug!(%message, "the wall is still busy, ignoring it"),
                            }
                        } else {
                            state.show_notice(Notice::InvalidMessage);
                        }
                    },
                    Action::CopyShareLink => {
                        next_copy_id += 1;
                        if !state.request_copy(next_copy_id) {
                            tracing::debug!("nothing to share yet, ignoring copy");
                        }
                    },
                    Action::LinkCopied { id } => {
                        if state.acknowledge_copy(id) {
                            copy_feedback.as_mut().reset(Instant::now() + COPY_FEEDBACK_DURATION);
                        } else {
                            tracing::debug!(id, "stale copy acknowledged, ignoring it");
                        }
                    },
                    Action::DismissNotice => {
                        state.dismiss_notice();
                    },
                    Action::Exit => {
                        let _ = terminator.terminate(Interrupted::UserInt);

                        break Interrupted::UserInt;
                    },
                },
                // Put the share bar back once the copy feedback has been shown long enough
                _ = &mut copy_feedback, if state.link_copied => {
                    state.clear_link_copied();
                },
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break interrupted;
                }
            }

            self.state_tx.send(state.clone())?;
        };

        if let Some(run) = active_run {
            run.abort();
        }

        Ok(result)
    }
}
