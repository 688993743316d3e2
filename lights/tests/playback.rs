use std::time::Duration;

use lights::{
    codec, link, normalize,
    player::Sequencer,
    sequencer::{self, PlaybackState, Timings},
};
use tokio::{
    sync::mpsc::{error::TryRecvError, UnboundedReceiver},
    time::Instant,
};

fn playing(active_letter: Option<char>, is_flickering_all: bool) -> PlaybackState {
    PlaybackState {
        is_playing: true,
        active_letter,
        is_flickering_all,
    }
}

/// Collects (elapsed millis, state) pairs until the wall goes back to idle
async fn collect_run(state_rx: &mut UnboundedReceiver<PlaybackState>) -> Vec<(u128, PlaybackState)> {
    let started_at = Instant::now();
    let mut published = Vec::new();

    while let Some(state) = state_rx.recv().await {
        published.push((started_at.elapsed().as_millis(), state));

        if state.is_idle() {
            break;
        }
    }

    published
}

#[tokio::test(start_paused = true)]
async fn assert_full_run_of_hi() {
    let (sequencer, mut state_rx) = Sequencer::new(Timings::default());

    let handle = sequencer.play(&normalize("HI")).expect("run should start");
    let published = collect_run(&mut state_rx).await;
    handle.await.unwrap();

    assert_eq!(
        published,
        vec![
            (0, playing(None, true)),
            (3000, playing(None, false)),
            (3500, playing(Some('H'), false)),
            (4300, playing(None, false)),
            (4500, playing(Some('I'), false)),
            (5300, playing(None, false)),
            (6000, playing(None, true)),
            (9000, playing(None, false)),
            (9000, PlaybackState::IDLE),
        ]
    );
    assert!(!sequencer.is_playing());
}

#[tokio::test(start_paused = true)]
async fn assert_published_states_follow_the_schedule() {
    let timings = Timings {
        letter_hold: Duration::from_millis(100),
        letter_gap: Duration::from_millis(50),
        ..Timings::default()
    };
    let message = normalize("Friends don't lie");
    let (sequencer, mut state_rx) = Sequencer::new(timings);

    sequencer.play(&message).expect("run should start");
    let published: Vec<PlaybackState> = collect_run(&mut state_rx)
        .await
        .into_iter()
        .map(|(_, state)| state)
        .collect();

    let expected: Vec<PlaybackState> = sequencer::schedule(&message, &timings)
        .into_iter()
        .map(|step| step.state)
        .collect();

    assert_eq!(published, expected);
}

#[tokio::test(start_paused = true)]
async fn assert_empty_message_is_ignored() {
    let (sequencer, mut state_rx) = Sequencer::new(Timings::default());

    assert!(sequencer.play(&normalize("")).is_none());
    assert!(sequencer.play(&normalize("123 ...")).is_none());
    assert!(!sequencer.is_playing());
    assert_eq!(state_rx.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test(start_paused = true)]
async fn assert_second_play_is_rejected_while_playing() {
    let timings = Timings::default();
    let message = normalize("run");
    let (sequencer, mut state_rx) = Sequencer::new(timings);

    let handle = sequencer.play(&message).expect("run should start");
    let mut published = vec![state_rx.recv().await.expect("first snapshot")];

    tokio::time::sleep(Duration::from_millis(3600)).await;
    assert!(sequencer.is_playing());
    assert!(sequencer.play(&normalize("hide")).is_none());

    handle.await.unwrap();
    while let Ok(state) = state_rx.try_recv() {
        published.push(state);
    }

    // nothing from the rejected call made it to the wall
    let expected: Vec<PlaybackState> = sequencer::schedule(&message, &timings)
        .into_iter()
        .map(|step| step.state)
        .collect();
    assert_eq!(published, expected);

    // the wall is free again once the run is over
    assert!(sequencer.play(&normalize("hide")).is_some());
}

#[tokio::test(start_paused = true)]
async fn assert_location_triggers_autoplay() {
    let location = link::parse_location(&format!(
        "https://wall.example/?msg={}",
        codec::encode(&normalize("OK"))
    ))
    .unwrap();
    let (sequencer, mut state_rx) = Sequencer::new(Timings::default());

    let message = link::message_from_location(&location).expect("location carries a message");
    sequencer.play(&message).expect("run should start");

    let lit: Vec<char> = collect_run(&mut state_rx)
        .await
        .into_iter()
        .filter_map(|(_, state)| state.active_letter)
        .collect();

    assert_eq!(lit, vec!['O', 'K']);
}
