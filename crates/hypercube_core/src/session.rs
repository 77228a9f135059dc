//! Action queue, replay and reset
//!
//! A [`Session`] owns the viewer and drives it one action per
//! [`Session::tick`]. Live actions come from a FIFO queue; while a replay
//! is running the queue is ignored and actions come from the log instead.

use std::collections::VecDeque;

use crate::action::{Action, ActionLog, PlaybackCursor, ResetFlags};
use crate::error::EngineError;
use crate::settings::{Setting, SettingField, Settings, SettingsError};
use crate::stepper::CancelToken;
use crate::viewer::{FrameSink, Viewer};

/// What one tick did
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Nothing to do
    Idle,
    /// A live action ran
    Executed(Action),
    /// Replay began; the wireframe was rebuilt
    ReplayStarted,
    /// One logged action was replayed
    Replayed(Action),
    /// The log is exhausted and live input is accepted again
    ReplayFinished,
}

pub struct Session {
    viewer: Viewer,
    log: ActionLog,
    queue: VecDeque<Action>,
    cursor: PlaybackCursor,
    /// Settings as of the last rebuild, restored at the start of a replay
    snapshot: Settings,
}

impl Session {
    /// Create a session with a viewer built from `settings`
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        let viewer = Viewer::new(settings)?;
        let snapshot = viewer.settings().clone();
        Ok(Self {
            viewer,
            log: ActionLog::new(SettingField::SLIDERS),
            queue: VecDeque::new(),
            cursor: PlaybackCursor::Idle,
            snapshot,
        })
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn settings(&self) -> &Settings {
        self.viewer.settings()
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.viewer.cancel_token()
    }

    #[inline]
    pub fn is_replaying(&self) -> bool {
        self.cursor.is_active()
    }

    /// Number of queued live actions
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue a live action. Ignored (returns `false`) while replaying.
    pub fn queue_action(&mut self, action: Action) -> bool {
        if self.is_replaying() {
            log::debug!("Ignoring {:?} during replay", action);
            return false;
        }
        self.queue.push_back(action);
        true
    }

    /// Execute at most one action
    pub fn tick(&mut self, sink: &mut dyn FrameSink) -> Result<TickOutcome, EngineError> {
        if self.is_replaying() {
            return match self.log.replay_step(&mut self.cursor) {
                Some(action) => {
                    self.run_action(action, sink, true)?;
                    Ok(TickOutcome::Replayed(action))
                }
                None => {
                    log::info!("Replay finished");
                    Ok(TickOutcome::ReplayFinished)
                }
            };
        }

        let Some(action) = self.queue.pop_front() else {
            return Ok(TickOutcome::Idle);
        };
        match action {
            Action::Playback => {
                self.start_replay(sink)?;
                Ok(TickOutcome::ReplayStarted)
            }
            Action::Reset(flags) => {
                self.reset(flags, sink)?;
                Ok(TickOutcome::Executed(action))
            }
            _ => {
                self.run_action(action, sink, false)?;
                Ok(TickOutcome::Executed(action))
            }
        }
    }

    /// Tick until there is nothing left to do; returns the number of
    /// actions executed or replayed.
    pub fn run_until_idle(&mut self, sink: &mut dyn FrameSink) -> Result<usize, EngineError> {
        let mut executed = 0;
        loop {
            match self.tick(sink)? {
                TickOutcome::Idle => return Ok(executed),
                TickOutcome::Executed(_) | TickOutcome::Replayed(_) => executed += 1,
                TickOutcome::ReplayStarted | TickOutcome::ReplayFinished => {}
            }
        }
    }

    /// Stop the running animation, drop queued actions and end any replay
    pub fn stop(&mut self) {
        self.viewer.cancel_token().cancel();
        self.queue.clear();
        self.cursor = PlaybackCursor::Idle;
    }

    /// Rebuild the wireframe.
    ///
    /// `FACTORY` restores default settings first, `DATA` the settings of the
    /// last rebuild. The other flags record what the caller changed and
    /// need no extra work. The log is cleared unless a replay is running.
    pub fn reset(&mut self, flags: ResetFlags, sink: &mut dyn FrameSink) -> Result<(), EngineError> {
        if flags.contains(ResetFlags::FACTORY) {
            self.viewer.replace_settings(Settings::default());
        } else if flags.contains(ResetFlags::DATA) {
            self.viewer.replace_settings(self.snapshot.clone());
        }
        self.viewer.rebuild()?;
        self.snapshot = self.viewer.settings().clone();
        if !self.is_replaying() {
            self.log.clear();
        }
        log::debug!("Reset with {:?}", flags);
        self.viewer.display(sink);
        Ok(())
    }

    /// Adopt new settings, rebuilding when the dimension count, aspect
    /// ratios or viewport size changed and redrawing otherwise.
    pub fn configure(&mut self, settings: Settings, sink: &mut dyn FrameSink) -> Result<(), EngineError> {
        settings.validate()?;
        let current = self.viewer.settings();
        let mut flags = ResetFlags::empty();
        if settings.dims != current.dims {
            flags |= ResetFlags::DIMS;
        }
        if settings.aspects != current.aspects {
            flags |= ResetFlags::ASPECT;
        }
        if settings.viewer_size != current.viewer_size {
            flags |= ResetFlags::VIEW_SIZE;
        }

        self.viewer.replace_settings(settings);
        if flags.is_empty() {
            self.viewer.display(sink);
            Ok(())
        } else {
            self.reset(flags, sink)
        }
    }

    fn start_replay(&mut self, sink: &mut dyn FrameSink) -> Result<(), EngineError> {
        log::info!("Replaying {} actions", self.log.len());
        self.cursor = PlaybackCursor::At(0);
        if self.viewer.settings().replay_visible {
            let mut restored = self.viewer.settings().clone();
            restored.restore_from(&self.snapshot);
            self.viewer.replace_settings(restored);
        }
        self.viewer.rebuild()?;
        self.viewer.display(sink);
        Ok(())
    }

    fn run_action(
        &mut self,
        action: Action,
        sink: &mut dyn FrameSink,
        replaying: bool,
    ) -> Result<(), EngineError> {
        let mut hidden_ghost = None;
        if let Action::SetVisible(setting) = action {
            if !replaying || self.viewer.settings().replay_visible {
                self.viewer.apply_setting(setting);
            }
            if matches!(
                setting.field(),
                SettingField::AutoScale | SettingField::ReplayVisible
            ) {
                // Read when the next rotation or replay starts
                return Ok(());
            }
            // Hidden faces would otherwise linger in the ghost trail
            let ghost = self.viewer.settings().ghost;
            if setting == Setting::ShowFaces(false) && ghost > 0 {
                hidden_ghost = Some(ghost);
                self.viewer.apply_setting(Setting::Ghost(0));
            }
        }

        let result = self.viewer.take_action(action, sink);
        if let Some(ghost) = hidden_ghost {
            self.viewer.apply_setting(Setting::Ghost(ghost));
        }
        let result = result?;

        if !replaying {
            if result.rebuilt {
                // The log restarts here, so replay must start from these settings
                self.snapshot = self.viewer.settings().clone();
                self.log.clear();
            }
            if result.acted {
                self.log.append(action);
            }
        }
        Ok(())
    }
}
