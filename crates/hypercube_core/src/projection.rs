//! Projection of N-dimensional nodes onto the screen plane
//!
//! Only the first three coordinates matter: x and y map to the screen and z
//! is depth. Higher dimensions show up through rotation into those three.
//!
//! ```text
//!             orthographic projection on screen
//!             |      perspective projection on screen
//!             |      |
//! window------O------P--------V-------> x- or y-axis
//! |           |\     |        |
//! |           | \    |        |
//! |     node: N  \   |        |
//! |               \  |        |
//! |                \ |        |
//! V                 \|        |
//! z-axis             '-------.vanishing point
//! ```

use serde::{Deserialize, Serialize};

/// How nodes are mapped onto the screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Drop every coordinate past y
    Orthographic,
    /// Pull nodes towards the vanishing point in proportion to their depth
    Perspective,
}

impl ProjectionMode {
    pub fn from_perspective(perspective: bool) -> Self {
        if perspective {
            ProjectionMode::Perspective
        } else {
            ProjectionMode::Orthographic
        }
    }
}

/// The point that perspective lines converge on
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VanishingPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl VanishingPoint {
    /// Vanishing point for a viewport: centered on screen, `width * depth`
    /// along the z-axis (each component rounded to a whole pixel).
    pub fn for_view(width: u32, height: u32, depth: f64) -> Self {
        Self {
            x: (width as f64 / 2.0).round(),
            y: (height as f64 / 2.0).round(),
            z: Self::depth_for(width, depth),
        }
    }

    /// z-distance for a viewport width and depth factor
    pub fn depth_for(width: u32, depth: f64) -> f64 {
        (width as f64 * depth).round()
    }

    /// Screen position of the vanishing point itself
    pub fn screen_xy(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// Map a node to integer screen coordinates.
///
/// `node` needs at least x and y; perspective also reads z (treated as 0 when
/// missing).
pub fn project(node: &[f64], perspective: bool, vp: &VanishingPoint) -> (i32, i32) {
    let mut x = node[0];
    let mut y = node[1];
    if perspective {
        let z = node.get(2).copied().unwrap_or(0.0);
        let f = z / vp.z;
        x += (vp.x - x) * f;
        y += (vp.y - y) * f;
    }
    (x.round() as i32, y.round() as i32)
}

/// Projection settings for one viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    pub mode: ProjectionMode,
    pub vanishing_point: VanishingPoint,
}

impl Projector {
    pub fn new(mode: ProjectionMode, vanishing_point: VanishingPoint) -> Self {
        Self {
            mode,
            vanishing_point,
        }
    }

    /// Project a node with the current mode
    #[inline]
    pub fn get_xy(&self, node: &[f64]) -> (i32, i32) {
        project(
            node,
            self.mode == ProjectionMode::Perspective,
            &self.vanishing_point,
        )
    }

    /// Re-derive the vanishing point depth after the depth factor changes
    pub fn set_depth(&mut self, width: u32, depth: f64) {
        self.vanishing_point.z = VanishingPoint::depth_for(width, depth);
    }
}
