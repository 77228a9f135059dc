//! Scripted session system
//!
//! Feeds a list of actions through a [`Session`], then optionally replays
//! the resulting log.

use hypercube_core::{Action, EngineError, FrameSink, Session, Sign, TickOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DemoConfig;

/// What a scripted run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Live actions executed
    pub executed: usize,
    /// Log entries replayed
    pub replayed: usize,
    /// Length of the log at the end
    pub logged: usize,
}

/// Runs a [`DemoConfig`] script against a session
pub struct ScriptRunner {
    script: Vec<Action>,
    random_rotations: usize,
    seed: Option<u64>,
    replay: bool,
}

impl ScriptRunner {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            script: config.script.clone(),
            random_rotations: config.random_rotations,
            seed: config.seed,
            replay: config.replay,
        }
    }

    /// Run the whole script, one tick per action
    pub fn run(&self, session: &mut Session, sink: &mut dyn FrameSink) -> Result<ScriptSummary, EngineError> {
        let mut summary = ScriptSummary::default();

        for action in &self.script {
            session.queue_action(*action);
            self.drain(session, sink, &mut summary)?;
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        for _ in 0..self.random_rotations {
            let action = Action::random_rotate(session.settings().dims, Sign::Plus, &mut rng);
            session.queue_action(action);
            self.drain(session, sink, &mut summary)?;
        }
        log::info!("Script done: {} actions, {} logged", summary.executed, session.log().len());

        if self.replay && !session.log().is_empty() {
            session.queue_action(Action::Playback);
            self.drain(session, sink, &mut summary)?;
        }

        summary.logged = session.log().len();
        Ok(summary)
    }

    fn drain(
        &self,
        session: &mut Session,
        sink: &mut dyn FrameSink,
        summary: &mut ScriptSummary,
    ) -> Result<(), EngineError> {
        loop {
            match session.tick(sink)? {
                TickOutcome::Idle => return Ok(()),
                TickOutcome::Executed(action) => {
                    log::debug!("Executed {:?}", action);
                    summary.executed += 1;
                }
                TickOutcome::Replayed(action) => {
                    log::debug!("Replayed {:?}", action);
                    summary.replayed += 1;
                }
                TickOutcome::ReplayStarted | TickOutcome::ReplayFinished => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::HeadlessRenderer;
    use hypercube_core::{Direction, Settings, Sign};

    fn session() -> Session {
        Session::new(Settings {
            show_steps: false,
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_script_with_replay() {
        let config = DemoConfig {
            script: vec![
                Action::rotate(0, 3, Sign::Plus),
                Action::Move(Direction::Right),
                Action::Zoom(Sign::Minus),
            ],
            replay: true,
            ..DemoConfig::default()
        };
        let mut session = session();
        let mut renderer = HeadlessRenderer::new(1000, 1000);
        let summary = ScriptRunner::new(&config).run(&mut session, &mut renderer).unwrap();

        assert_eq!(
            summary,
            ScriptSummary {
                executed: 3,
                replayed: 3,
                logged: 3,
            }
        );
        // One frame per action without steps, twice, plus the replay's first frame
        assert_eq!(renderer.stats().frames, 7);
        assert_eq!(renderer.stats().off_screen, 0);
    }

    #[test]
    fn test_script_without_replay() {
        let config = DemoConfig {
            script: vec![Action::Zoom(Sign::Plus)],
            replay: false,
            ..DemoConfig::default()
        };
        let mut session = session();
        let mut renderer = HeadlessRenderer::new(1000, 1000);
        let summary = ScriptRunner::new(&config).run(&mut session, &mut renderer).unwrap();
        assert_eq!(summary.replayed, 0);
        assert_eq!(summary.logged, 1);
    }

    #[test]
    fn test_seeded_random_rotations_replay() {
        let config = DemoConfig {
            script: vec![Action::SetDims(6)],
            random_rotations: 3,
            seed: Some(11),
            replay: true,
        };
        let mut session = session();
        let mut renderer = HeadlessRenderer::new(1000, 1000);
        let summary = ScriptRunner::new(&config).run(&mut session, &mut renderer).unwrap();
        assert_eq!(summary.executed, 4);
        assert_eq!(summary.replayed, 4);
        assert!(session.log().iter().skip(1).all(|a| matches!(
            a,
            Action::Rotate { dim3: Some(_), .. }
        )));

        // The same seed draws the same rotations
        let mut again = self::session();
        let mut renderer = HeadlessRenderer::new(1000, 1000);
        ScriptRunner::new(&config).run(&mut again, &mut renderer).unwrap();
        assert_eq!(again.log().as_slice(), session.log().as_slice());
    }

    #[test]
    fn test_script_stops_on_bad_axis() {
        let config = DemoConfig {
            script: vec![Action::rotate(0, 7, Sign::Plus)],
            replay: true,
            ..DemoConfig::default()
        };
        let mut session = session();
        let mut renderer = HeadlessRenderer::new(1000, 1000);
        let result = ScriptRunner::new(&config).run(&mut session, &mut renderer);
        assert_eq!(result, Err(EngineError::AxisOutOfRange { axis: 7, dims: 4 }));
    }
}
