//! Integration tests for live execution and replay
//!
//! A replay starts from a freshly built wireframe, so it must reproduce the
//! live session frame for frame.

use hypercube_core::{
    Action, Direction, DrawList, ResetFlags, Session, Setting, Settings, Sign, TickOutcome,
};

fn record(session: &mut Session) -> Vec<DrawList> {
    let mut frames = Vec::new();
    session
        .run_until_idle(&mut |f: &DrawList| frames.push(f.clone()))
        .unwrap();
    frames
}

#[test]
fn test_replay_matches_live_session() {
    let mut session = Session::new(Settings::default()).unwrap();
    for action in [
        Action::rotate(0, 1, Sign::Plus),
        Action::Move(Direction::Left),
        Action::Zoom(Sign::Plus),
    ] {
        assert!(session.queue_action(action));
    }
    let live = record(&mut session);
    // 30 rotation frames, 10 move frames, 10 zoom frames
    assert_eq!(live.len(), 50);
    assert_eq!(session.log().len(), 3);
    let live_nodes = session.viewer().wireframe().nodes().clone();

    session.queue_action(Action::Playback);
    let replayed = record(&mut session);
    // The rebuilt wireframe is shown once before replaying
    assert_eq!(replayed.len(), 51);
    assert_eq!(&replayed[1..], &live[..]);
    assert_eq!(session.viewer().wireframe().nodes().max_abs_diff(&live_nodes), 0.0);
}

#[test]
fn test_replay_of_dual_plane_rotation_with_settings() {
    let settings = Settings {
        show_faces: true,
        opacity: 0.5,
        angle: 10,
        ..Settings::default()
    };
    let mut session = Session::new(settings).unwrap();
    session.queue_action(Action::SetVisible(Setting::Ghost(3)));
    session.queue_action(Action::SetVisible(Setting::Ghost(6)));
    session.queue_action(Action::Rotate {
        dim1: 0,
        dim2: 2,
        dim3: Some(3),
        sign: Sign::Minus,
    });
    session.queue_action(Action::SetVisible(Setting::ShowPerspective(true)));
    session.queue_action(Action::Zoom(Sign::Minus));
    let live = record(&mut session);
    // Slider changes collapse into one entry
    assert_eq!(session.log().len(), 4);
    let live_nodes = session.viewer().wireframe().nodes().clone();

    session.queue_action(Action::Playback);
    let replayed = record(&mut session);
    // One fewer ghost frame on replay, plus the initial frame
    assert_eq!(replayed.len(), live.len());
    assert_eq!(&replayed[1..], &live[1..]);
    assert!(session.viewer().wireframe().nodes().max_abs_diff(&live_nodes) < 1e-9);
    assert!(session.settings().show_perspective);
    assert_eq!(session.settings().ghost, 6);
}

#[test]
fn test_replay_is_repeatable() {
    let mut session = Session::new(Settings {
        show_steps: false,
        ..Settings::default()
    })
    .unwrap();
    session.queue_action(Action::rotate(1, 3, Sign::Plus));
    session.queue_action(Action::Move(Direction::Down));
    record(&mut session);

    session.queue_action(Action::Playback);
    let first = record(&mut session);
    session.queue_action(Action::Playback);
    let second = record(&mut session);
    assert_eq!(first, second);
    assert_eq!(session.log().len(), 2);
}

#[test]
fn test_reset_then_replay_is_empty() {
    let mut session = Session::new(Settings::default()).unwrap();
    session.queue_action(Action::Zoom(Sign::Plus));
    session.queue_action(Action::Reset(ResetFlags::VIEW_SIZE));
    record(&mut session);
    assert!(session.log().is_empty());

    session.queue_action(Action::Playback);
    let mut sink = |_: &DrawList| {};
    assert_eq!(session.tick(&mut sink).unwrap(), TickOutcome::ReplayStarted);
    assert_eq!(session.tick(&mut sink).unwrap(), TickOutcome::ReplayFinished);
    assert_eq!(session.tick(&mut sink).unwrap(), TickOutcome::Idle);
}

#[test]
fn test_every_dimension_count_runs() {
    for dims in 3..=10 {
        let mut session = Session::new(Settings {
            dims,
            show_steps: false,
            ..Settings::default()
        })
        .unwrap();
        session.queue_action(Action::rotate(0, dims - 1, Sign::Plus));
        let frames = record(&mut session);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].lines().count(), dims << (dims - 1));
    }
}
