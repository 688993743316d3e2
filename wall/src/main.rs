use clap::Parser;

use config::{Args, Config};
use state_store::StateStore;
use termination::create_termination;
use ui_management::UiManager;

mod clipboard;
mod config;
mod logging;
mod state_store;
mod termination;
mod ui_management;

pub use termination::{Interrupted, Terminator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    logging::setup_tracing(args.log_file)?;

    let location = config.location(args.location.as_deref())?;
    tracing::info!(%location, "opening the wall");

    let (terminator, interrupt_rx) = create_termination();
    let (state_store, state_rx) = StateStore::new(location, config.playback_options());
    let (ui_manager, action_rx) = UiManager::new();

    let (interrupted, _) = tokio::try_join!(
        state_store.main_loop(terminator, action_rx, interrupt_rx.resubscribe()),
        ui_manager.main_loop(state_rx, interrupt_rx.resubscribe()),
    )?;

    match interrupted {
        Interrupted::UserInt => println!("exited per user request"),
        Interrupted::OsSigInt => println!("exited because of an os sig int"),
    }

    Ok(())
}
