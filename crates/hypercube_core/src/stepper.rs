//! Animation stepping
//!
//! One discrete request (rotate by an angle, scale by a factor, move by an
//! amount) is split into `count` small transforms. After each one the
//! caller's `on_step` callback runs (normally to draw a frame) and the
//! [`CancelToken`] is polled; a cancelled animation simply stops where it is.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hypercube_math::HMatrix;

use crate::topology::{DirtyFlags, Wireframe};

/// Cooperative stop flag shared between the engine and whoever drives it
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask running animations to stop after their current step
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clear the flag before starting new work
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How far an animation got
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Number of steps applied
    pub applied: usize,
    /// Whether the animation stopped early
    pub cancelled: bool,
}

/// A rotation about one plane, or two planes sharing `dim1`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateRequest {
    pub dim1: usize,
    pub dim2: usize,
    /// Second plane is `(dim1, dim3)` when present
    pub dim3: Option<usize>,
    /// Total angle in radians
    pub theta: f64,
    /// Growth factor spread over the whole rotation (1.0 = none)
    pub auto_scale: f64,
    /// Sub-steps for each per-step auto-scale
    pub auto_scale_steps: usize,
}

impl RotateRequest {
    /// Rotate by `theta` radians in the `(dim1, dim2)` plane
    pub fn new(dim1: usize, dim2: usize, theta: f64) -> Self {
        Self {
            dim1,
            dim2,
            dim3: None,
            theta,
            auto_scale: 1.0,
            auto_scale_steps: 1,
        }
    }

    /// Also rotate in the `(dim1, dim3)` plane at the same time
    pub fn with_third(mut self, dim3: Option<usize>) -> Self {
        self.dim3 = dim3;
        self
    }

    /// Grow (or shrink) by `factor` over the course of the rotation
    pub fn with_auto_scale(mut self, factor: f64, steps: usize) -> Self {
        self.auto_scale = factor;
        self.auto_scale_steps = steps.max(1);
        self
    }
}

/// Per-step angles for a single-plane rotation: `count` equal slices
pub fn single_plane_angles(theta: f64, count: usize) -> Vec<f64> {
    assert!(count >= 1, "step count must be positive");
    vec![theta / count as f64; count]
}

/// Per-step angles for a dual-plane rotation.
///
/// The angles grow linearly from 0 to `2θ/count`, so they still sum to `θ`.
/// The first plane consumes the list back to front and the second front to
/// back, so one plane eases out while the other eases in. For `count == 1`
/// the single step is `θ/2`. A negative `θ` reverses the list.
pub fn dual_plane_angles(theta: f64, count: usize) -> Vec<f64> {
    assert!(count >= 1, "step count must be positive");
    let delta = theta / count as f64;
    let mut angles = if count > 1 {
        let step = delta * 2.0 / (count - 1) as f64;
        let angles: Vec<f64> = (0..count).map(|n| n as f64 * step).collect();
        debug_assert!(
            (angles.iter().sum::<f64>() - theta).abs() <= 1e-9 * theta.abs().max(1.0),
            "dual-plane angles must sum to theta"
        );
        angles
    } else {
        vec![delta / 2.0]
    };
    if theta < 0.0 {
        angles.reverse();
    }
    angles
}

/// Rotate the wireframe about its center in `count` steps.
///
/// Every step marks edges and faces for re-sorting. With auto-scale set,
/// each step is followed by a nested [`scale`] of
/// `(auto_scale - 1) / count + 1`.
///
/// # Panics
/// If a dimension index is out of range for the wireframe.
pub fn rotate<F>(
    wireframe: &mut Wireframe,
    request: RotateRequest,
    count: usize,
    cancel: &CancelToken,
    mut on_step: F,
) -> StepOutcome
where
    F: FnMut(&mut Wireframe),
{
    let dims = wireframe.dims();
    assert!(
        request.dim1 < dims && request.dim2 < dims,
        "rotation plane ({}, {}) out of range for {} dimensions",
        request.dim1,
        request.dim2,
        dims
    );
    if let Some(dim3) = request.dim3 {
        assert!(dim3 < dims, "third rotation axis {} out of range", dim3);
    }

    let count = count.max(1);
    let angles = match request.dim3 {
        None => single_plane_angles(request.theta, count),
        Some(_) => dual_plane_angles(request.theta, count),
    };
    let step_scale = (request.auto_scale - 1.0) / count as f64 + 1.0;

    let mut outcome = StepOutcome::default();
    for n in 0..count {
        let mut matrix = HMatrix::rotation(dims, request.dim1, request.dim2, angles[count - 1 - n]);
        if let Some(dim3) = request.dim3 {
            matrix = matrix.with_rotation(request.dim1, dim3, angles[n]);
        }
        let matrix = wireframe.about_center(&matrix);
        wireframe.transform(&matrix);
        wireframe.mark_dirty(DirtyFlags::ALL);
        outcome.applied += 1;
        on_step(wireframe);

        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }
        if step_scale != 1.0 {
            let nested = scale(wireframe, step_scale, request.auto_scale_steps, cancel, &mut on_step);
            if nested.cancelled {
                outcome.cancelled = true;
                break;
            }
        }
    }
    outcome
}

/// Scale the wireframe about its center by `factor` in `count` steps.
///
/// Scaling is multiplicative, so each step uses `factor^(1/count)`.
pub fn scale<F>(
    wireframe: &mut Wireframe,
    factor: f64,
    count: usize,
    cancel: &CancelToken,
    mut on_step: F,
) -> StepOutcome
where
    F: FnMut(&mut Wireframe),
{
    let count = count.max(1);
    let per_step = factor.powf(1.0 / count as f64);
    let matrix = wireframe.about_center(&HMatrix::scale(wireframe.dims(), per_step));

    let mut outcome = StepOutcome::default();
    for _ in 0..count {
        wireframe.transform(&matrix);
        outcome.applied += 1;
        on_step(wireframe);
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }
    }
    outcome
}

/// Move the wireframe by `amount` along `axis` in `count` equal steps.
///
/// The center moves with the nodes so later rotations pivot correctly.
pub fn translate<F>(
    wireframe: &mut Wireframe,
    axis: usize,
    amount: f64,
    count: usize,
    cancel: &CancelToken,
    mut on_step: F,
) -> StepOutcome
where
    F: FnMut(&mut Wireframe),
{
    let count = count.max(1);
    let delta = amount / count as f64;

    let mut outcome = StepOutcome::default();
    for _ in 0..count {
        wireframe.translate_axis(axis, delta);
        outcome.applied += 1;
        on_step(wireframe);
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }
    }
    outcome
}
