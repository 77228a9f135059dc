//! Actions and the action log
//!
//! Every user request becomes an [`Action`]. Actions that changed what is on
//! screen are appended to an [`ActionLog`] so they can be replayed later
//! against a freshly built wireframe.

use std::collections::HashSet;

use bitflags::bitflags;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::{Setting, SettingField};

/// Pixels moved by one move request
pub const MOVE_DISTANCE: f64 = 40.0;

/// Screen direction for a move request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Axis and signed distance of one move
    pub fn offset(self) -> (usize, f64) {
        match self {
            Direction::Left => (0, -MOVE_DISTANCE),
            Direction::Right => (0, MOVE_DISTANCE),
            Direction::Up => (1, -MOVE_DISTANCE),
            Direction::Down => (1, MOVE_DISTANCE),
        }
    }
}

/// Sign of a rotation or zoom
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Sign {
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Sign::Plus => value,
            Sign::Minus => -value,
        }
    }
}

bitflags! {
    /// What a reset should restore before rebuilding
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ResetFlags: u8 {
        /// Go back to factory default settings
        const FACTORY = 1 << 0;
        /// Go back to the settings of the last rebuild
        const DATA = 1 << 1;
        /// The dimension count changed
        const DIMS = 1 << 2;
        /// The aspect ratios changed
        const ASPECT = 1 << 3;
        /// The viewport size changed
        const VIEW_SIZE = 1 << 4;
    }
}

/// A user request
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Rebuild the wireframe; never logged
    Reset(ResetFlags),
    /// Replay the action log; never logged
    Playback,
    /// Move the wireframe across the screen
    Move(Direction),
    /// Rotate in the `(dim1, dim2)` plane, plus `(dim1, dim3)` when present
    Rotate {
        dim1: usize,
        dim2: usize,
        #[serde(default)]
        dim3: Option<usize>,
        sign: Sign,
    },
    /// Grow (`+`) or shrink (`-`)
    Zoom(Sign),
    /// Rebuild with a new dimension count
    SetDims(usize),
    /// Change one display setting
    SetVisible(Setting),
}

impl Action {
    /// Single-plane rotation helper
    pub fn rotate(dim1: usize, dim2: usize, sign: Sign) -> Self {
        Action::Rotate {
            dim1,
            dim2,
            dim3: None,
            sign,
        }
    }

    /// Dual-plane rotation on randomly chosen axes.
    ///
    /// `dim1` is x or y; `dim2` and `dim3` are two further distinct axes.
    ///
    /// # Panics
    /// If `dims` is below 3.
    pub fn random_rotate<R: Rng + ?Sized>(dims: usize, sign: Sign, rng: &mut R) -> Self {
        assert!(dims >= 3, "random rotation needs at least 3 dimensions");
        let mut axes: Vec<usize> = (0..dims).collect();
        let dim1 = axes.remove(rng.gen_range(0..=1));
        let dim2 = axes.remove(rng.gen_range(0..axes.len()));
        let dim3 = axes.remove(rng.gen_range(0..axes.len()));
        Action::Rotate {
            dim1,
            dim2,
            dim3: Some(dim3),
            sign,
        }
    }

    /// Actions that are never written to the log
    pub fn is_control(&self) -> bool {
        matches!(self, Action::Reset(_) | Action::Playback)
    }
}

/// Replay position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackCursor {
    /// Not replaying
    #[default]
    Idle,
    /// Next action to replay
    At(usize),
}

impl PlaybackCursor {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, PlaybackCursor::At(_))
    }
}

/// Ordered record of executed actions
///
/// Runs of changes to the same slider-backed setting collapse into one entry
/// holding the final value, so a drag across 40 positions replays as a
/// single jump.
#[derive(Clone, Debug, Default)]
pub struct ActionLog {
    actions: Vec<Action>,
    sliders: HashSet<SettingField>,
    merge: bool,
}

impl ActionLog {
    /// Create a log that merges consecutive changes to `sliders`
    pub fn new(sliders: impl IntoIterator<Item = SettingField>) -> Self {
        Self {
            actions: Vec::new(),
            sliders: sliders.into_iter().collect(),
            merge: true,
        }
    }

    /// Turn slider merging on or off
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Record an action.
    ///
    /// If both the new action and the last entry change the same slider
    /// field, the last entry is replaced instead.
    pub fn append(&mut self, action: Action) {
        if self.merge {
            if let (Action::SetVisible(new), Some(Action::SetVisible(last))) =
                (&action, self.actions.last())
            {
                let field = new.field();
                if field == last.field() && self.sliders.contains(&field) {
                    log::trace!("Merging {} change into previous entry", field);
                    if let Some(slot) = self.actions.last_mut() {
                        *slot = action;
                    }
                    return;
                }
            }
        }
        self.actions.push(action);
    }

    /// Next action to replay, advancing `cursor`.
    ///
    /// Returns `None` and parks the cursor at [`PlaybackCursor::Idle`] once
    /// the log is exhausted (or when it was not replaying).
    pub fn replay_step(&self, cursor: &mut PlaybackCursor) -> Option<Action> {
        let PlaybackCursor::At(index) = *cursor else {
            return None;
        };
        match self.actions.get(index) {
            Some(action) => {
                *cursor = PlaybackCursor::At(index + 1);
                Some(*action)
            }
            None => {
                *cursor = PlaybackCursor::Idle;
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> ActionLog {
        ActionLog::new(SettingField::SLIDERS)
    }

    #[test]
    fn test_slider_changes_merge() {
        let mut log = log();
        log.append(Action::SetVisible(Setting::Ghost(3)));
        log.append(Action::SetVisible(Setting::Ghost(5)));
        assert_eq!(log.as_slice(), &[Action::SetVisible(Setting::Ghost(5))]);
    }

    #[test]
    fn test_toggles_do_not_merge() {
        let mut log = log();
        log.append(Action::SetVisible(Setting::ShowFaces(true)));
        log.append(Action::SetVisible(Setting::ShowFaces(false)));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_different_sliders_do_not_merge() {
        let mut log = log();
        log.append(Action::SetVisible(Setting::Ghost(3)));
        log.append(Action::SetVisible(Setting::Depth(4.0)));
        log.append(Action::SetVisible(Setting::Depth(4.5)));
        assert_eq!(
            log.as_slice(),
            &[
                Action::SetVisible(Setting::Ghost(3)),
                Action::SetVisible(Setting::Depth(4.5)),
            ]
        );
    }

    #[test]
    fn test_merge_only_with_last_entry() {
        let mut log = log();
        log.append(Action::SetVisible(Setting::Angle(5)));
        log.append(Action::Zoom(Sign::Plus));
        log.append(Action::SetVisible(Setting::Angle(10)));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_merge_can_be_disabled() {
        let mut log = log().with_merge(false);
        log.append(Action::SetVisible(Setting::Ghost(3)));
        log.append(Action::SetVisible(Setting::Ghost(5)));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_replay_step_walks_the_log() {
        let mut log = log();
        log.append(Action::rotate(0, 1, Sign::Plus));
        log.append(Action::Move(Direction::Left));

        let mut cursor = PlaybackCursor::At(0);
        assert_eq!(log.replay_step(&mut cursor), Some(Action::rotate(0, 1, Sign::Plus)));
        assert_eq!(cursor, PlaybackCursor::At(1));
        assert_eq!(log.replay_step(&mut cursor), Some(Action::Move(Direction::Left)));
        assert_eq!(log.replay_step(&mut cursor), None);
        assert_eq!(cursor, PlaybackCursor::Idle);
        assert_eq!(log.replay_step(&mut cursor), None);
    }

    #[test]
    fn test_replay_empty_log() {
        let mut cursor = PlaybackCursor::At(0);
        assert_eq!(log().replay_step(&mut cursor), None);
        assert!(!cursor.is_active());
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(), (0, -40.0));
        assert_eq!(Direction::Down.offset(), (1, 40.0));
    }

    #[test]
    fn test_random_rotate_picks_distinct_axes() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(7);
        for dims in 3..=10 {
            for _ in 0..50 {
                match Action::random_rotate(dims, Sign::Minus, &mut rng) {
                    Action::Rotate {
                        dim1,
                        dim2,
                        dim3: Some(dim3),
                        sign,
                    } => {
                        assert!(dim1 <= 1);
                        assert!(dim2 < dims && dim3 < dims);
                        assert!(dim1 != dim2 && dim1 != dim3 && dim2 != dim3);
                        assert_eq!(sign, Sign::Minus);
                    }
                    other => panic!("unexpected {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_random_rotate_is_seeded() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let a = Action::random_rotate(6, Sign::Plus, &mut StdRng::seed_from_u64(42));
        let b = Action::random_rotate(6, Sign::Plus, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_control_actions() {
        assert!(Action::Playback.is_control());
        assert!(Action::Reset(ResetFlags::DIMS).is_control());
        assert!(!Action::Zoom(Sign::Minus).is_control());
    }

    #[test]
    fn test_action_from_toml() {
        #[derive(Deserialize)]
        struct Script {
            steps: Vec<Action>,
        }
        let script: Script = toml::from_str(
            r#"
            steps = [
                { rotate = { dim1 = 0, dim2 = 3, sign = "+" } },
                { move = "left" },
                { zoom = "-" },
                { set_visible = { ghost = 4 } },
                "playback",
            ]
            "#,
        )
        .unwrap();
        assert_eq!(
            script.steps,
            vec![
                Action::rotate(0, 3, Sign::Plus),
                Action::Move(Direction::Left),
                Action::Zoom(Sign::Minus),
                Action::SetVisible(Setting::Ghost(4)),
                Action::Playback,
            ]
        );
    }
}
