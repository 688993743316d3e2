use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use crate::{
    message::Message,
    sequencer::{Phase, PlaybackState, Timings},
};

/// [Sequencer] plays messages on the wall, one run at a time.
///
/// Every change of the [PlaybackState] is published to the receiver returned by [Sequencer::new].
/// A run can not be cancelled once started; aborting the returned task handle only
/// stops publishing and releases the wall.
pub struct Sequencer {
    state_tx: UnboundedSender<PlaybackState>,
    running: Arc<AtomicBool>,
    timings: Timings,
}

impl Sequencer {
    pub fn new(timings: Timings) -> (Self, UnboundedReceiver<PlaybackState>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<PlaybackState>();

        (
            Sequencer {
                state_tx,
                running: Arc::new(AtomicBool::new(false)),
                timings,
            },
            state_rx,
        )
    }

    pub fn is_playing(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Starts a run of the message on a new task.
    ///
    /// Returns `None` without publishing anything when the message is empty
    /// or another run is still in progress; such calls are dropped, not queued.
    /// Must be called within a tokio runtime.
    pub fn play(&self, message: &Message) -> Option<JoinHandle<()>> {
        if message.is_empty() {
            tracing::debug!("ignoring play of an empty message");
            return None;
        }

        // the token is taken before anything is awaited, a second call can not sneak in
        let Some(token) = RunToken::acquire(&self.running) else {
            tracing::debug!(%message, "a run is already in progress, ignoring play");
            return None;
        };

        let phase = Phase::first(message);
        let published = phase.snapshot(message);
        if self.state_tx.send(published).is_err() {
            tracing::debug!("playback receiver is gone, not starting the run");
            return None;
        }

        let run = Run {
            message: message.clone(),
            timings: self.timings,
            state_tx: self.state_tx.clone(),
            token: Some(token),
        };

        Some(tokio::spawn(run.execute(phase, published)))
    }
}

/// Held for the whole duration of a run, releases the wall when dropped
struct RunToken(Arc<AtomicBool>);

impl RunToken {
    fn acquire(running: &Arc<AtomicBool>) -> Option<Self> {
        running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunToken(running.clone()))
    }
}

impl Drop for RunToken {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct Run {
    message: Message,
    timings: Timings,
    state_tx: UnboundedSender<PlaybackState>,
    token: Option<RunToken>,
}

impl Run {
    async fn execute(mut self, mut phase: Phase, mut published: PlaybackState) {
        tracing::info!(
            message = %self.message,
            length = ?self.timings.run_length(self.message.len()),
            "playback started"
        );

        loop {
            let hold = phase.hold(&self.timings);
            if !hold.is_zero() {
                tokio::time::sleep(hold).await;
            }

            phase = phase.next(self.message.len());

            let state = phase.snapshot(&self.message);
            if state != published {
                if self.state_tx.send(state).is_err() {
                    tracing::debug!("playback receiver is gone, stopping the run");
                    return;
                }

                published = state;
            }

            if phase == Phase::Idle {
                break;
            }
        }

        // idle goes out while the token is still held, no other run can publish in between
        drop(self.token.take());

        tracing::info!(message = %self.message, "playback finished");
    }
}
