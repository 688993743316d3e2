use anyhow::Context;
use lights::{codec, link, normalize, player::Sequencer, PlaybackState, Timings};
use tokio::time::Instant;

const LOCATION: &str = "http://localhost:5173/";

fn describe(state: &PlaybackState) -> String {
    match (state.is_playing, state.active_letter, state.is_flickering_all) {
        (false, _, _) => String::from("idle"),
        (true, _, true) => String::from("*** flicker ***"),
        (true, Some(letter), false) => format!("[{letter}]"),
        (true, None, false) => String::from("..."),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // spell out the command line arguments, or a default message
    let raw = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let message = normalize(if raw.is_empty() { "Run" } else { raw.as_str() });
    let message = message
        .non_empty()
        .context("message has no letters to spell out")?;

    let location = link::parse_location(LOCATION)?;
    println!("token: {}", codec::encode(&message));
    if let Some(url) = link::share_url(&location, &message) {
        println!("share: {url}");
    }

    let (sequencer, mut state_rx) = Sequencer::new(Timings::default());
    let handle = sequencer
        .play(&message)
        .context("sequencer refused to play")?;
    let started_at = Instant::now();

    while let Some(state) = state_rx.recv().await {
        println!("{:>6}ms {}", started_at.elapsed().as_millis(), describe(&state));

        if state.is_idle() {
            break;
        }
    }

    handle.await?;

    Ok(())
}
