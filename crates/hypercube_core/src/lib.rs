//! Core of the hypercube viewer
//!
//! Builds N-dimensional hyper-rectangle wireframes (3 to 10 dimensions),
//! animates rotations, zooms and moves in small steps, projects the result
//! onto a 2D screen and keeps a replayable log of user actions:
//!
//! - [`Wireframe`] - Nodes, edges and faces of a hyper-rectangle
//! - [`stepper`] - Splits one request into animation steps
//! - [`Projector`] - Orthographic or perspective projection
//! - [`DrawList`] - One composed frame of 2D primitives
//! - [`Viewer`] - Executes actions against a wireframe
//! - [`ActionLog`] - Replayable record of executed actions
//! - [`Session`] - Action queue, replay and reset

pub mod action;
pub mod colors;
pub mod draw;
mod error;
pub mod projection;
pub mod session;
pub mod settings;
pub mod stepper;
pub mod topology;
pub mod viewer;

pub use action::{Action, ActionLog, Direction, PlaybackCursor, ResetFlags, Sign};
pub use colors::{Color, FaceColors};
pub use draw::{DrawList, Primitive};
pub use error::EngineError;
pub use projection::{project, ProjectionMode, Projector, VanishingPoint};
pub use session::{Session, TickOutcome};
pub use settings::{
    parse_aspects, parse_viewer_size, Setting, SettingField, Settings, SettingsError, MAX_DIMS,
    MIN_DIMS,
};
pub use stepper::{CancelToken, RotateRequest, StepOutcome};
pub use topology::{DirtyFlags, Edge, Face, Layout, Orientation, Wireframe};
pub use viewer::{ActionResult, FrameSink, Viewer};

// Re-export the math types for convenience
pub use hypercube_math::{HMatrix, NodeMatrix};
