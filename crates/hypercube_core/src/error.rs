//! Engine error types
//!
//! Errors raised while executing actions against a viewer.

use std::fmt;

use crate::settings::SettingsError;

/// Error type for engine operations
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Settings failed validation during a rebuild
    Settings(SettingsError),
    /// A rotation named an axis the wireframe does not have
    AxisOutOfRange { axis: usize, dims: usize },
    /// A rotation plane needs two distinct axes
    DegeneratePlane(usize),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Settings(err) => write!(f, "Settings error: {}", err),
            EngineError::AxisOutOfRange { axis, dims } => {
                write!(f, "Axis {} out of range for {} dimensions", axis, dims)
            }
            EngineError::DegeneratePlane(axis) => {
                write!(f, "Rotation plane uses axis {} twice", axis)
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Settings(err) => Some(err),
            EngineError::AxisOutOfRange { .. } => None,
            EngineError::DegeneratePlane(_) => None,
        }
    }
}

impl From<SettingsError> for EngineError {
    fn from(err: SettingsError) -> Self {
        EngineError::Settings(err)
    }
}
