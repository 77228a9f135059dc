//! Application systems
//!
//! The pieces the driver binary wires together: a frame sink that renders
//! nowhere and a runner for scripted sessions.

mod headless;
mod script;

pub use headless::{FrameStats, HeadlessRenderer};
pub use script::{ScriptRunner, ScriptSummary};
