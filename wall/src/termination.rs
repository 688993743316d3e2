use tokio::sync::broadcast;

/// Reason the wall is shutting down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interrupted {
    /// Ctrl-C reached the process as a signal
    OsSigInt,
    /// The user asked to quit from the wall
    UserInt,
}

#[derive(Debug, Clone)]
pub struct Terminator {
    interrupt_tx: broadcast::Sender<Interrupted>,
}

impl Terminator {
    pub fn new(interrupt_tx: broadcast::Sender<Interrupted>) -> Self {
        Self { interrupt_tx }
    }

    pub fn terminate(&mut self, interrupted: Interrupted) -> anyhow::Result<()> {
        tracing::info!(?interrupted, "shutting down");
        self.interrupt_tx.send(interrupted)?;

        Ok(())
    }
}

async fn terminate_by_ctrl_c(mut terminator: Terminator) {
    // raw mode swallows ctrl-c as a key press, this only fires before and after the ui runs
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "could not listen for ctrl-c");
        return;
    }

    let _ = terminator.terminate(Interrupted::OsSigInt);
}

// create a broadcast channel for retrieving the application kill signal
pub fn create_termination() -> (Terminator, broadcast::Receiver<Interrupted>) {
    let (tx, rx) = broadcast::channel(1);
    let terminator = Terminator::new(tx);

    tokio::spawn(terminate_by_ctrl_c(terminator.clone()));

    (terminator, rx)
}
