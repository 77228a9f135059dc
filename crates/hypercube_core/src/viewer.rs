//! The viewer: one wireframe on one viewport
//!
//! [`Viewer`] ties the wireframe, its projector and the settings together
//! and executes actions as animations. Frames are handed to a
//! [`FrameSink`] as they are produced.

use crate::action::{Action, Direction, Sign};
use crate::colors::{self, FaceColors};
use crate::draw::{self, DrawList};
use crate::error::EngineError;
use crate::projection::{ProjectionMode, Projector, VanishingPoint};
use crate::settings::{Setting, Settings, SettingsError};
use crate::stepper::{self, CancelToken, RotateRequest, StepOutcome};
use crate::topology::{Layout, Wireframe};

/// Growth factor of one zoom request
pub const ZOOM_FACTOR: f64 = 1.1;
/// Animation steps for moves and zooms
pub const MOTION_STEPS: usize = 10;

/// Receives every frame the engine produces
pub trait FrameSink {
    fn display(&mut self, frame: &DrawList);
}

impl<F: FnMut(&DrawList)> FrameSink for F {
    fn display(&mut self, frame: &DrawList) {
        self(frame)
    }
}

/// What executing an action did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionResult {
    /// The action changed the display and belongs in the log
    pub acted: bool,
    /// The wireframe was rebuilt from scratch
    pub rebuilt: bool,
}

pub struct Viewer {
    settings: Settings,
    wireframe: Wireframe,
    projector: Projector,
    face_colors: FaceColors,
    cancel: CancelToken,
    width: u32,
}

impl Viewer {
    /// Validate `settings` and build the initial wireframe
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut face_colors = FaceColors::new();
        let (wireframe, projector, width) = layout(&settings, &mut face_colors)?;
        Ok(Self {
            settings,
            wireframe,
            projector,
            face_colors,
            cancel: CancelToken::new(),
            width,
        })
    }

    /// Build a fresh wireframe from the current settings
    pub fn rebuild(&mut self) -> Result<(), SettingsError> {
        let (wireframe, projector, width) = layout(&self.settings, &mut self.face_colors)?;
        self.wireframe = wireframe;
        self.projector = projector;
        self.width = width;
        log::info!(
            "Rebuilt {}-D wireframe for a {}x{} view",
            self.settings.dims,
            width,
            self.settings.view_size().map(|(_, h)| h).unwrap_or_default()
        );
        log::debug!("Axis colors: {}", colors::axis_legend(self.settings.dims));
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn wireframe(&self) -> &Wireframe {
        &self.wireframe
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Token that stops running animations; shared with the viewer
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Change one setting, updating the projection when it depends on it.
    ///
    /// Takes effect on the next frame; the wireframe is not rebuilt.
    pub fn apply_setting(&mut self, setting: Setting) {
        self.settings.apply(setting);
        match setting {
            Setting::Depth(depth) => self.projector.set_depth(self.width, depth),
            Setting::ShowPerspective(on) => {
                self.projector.mode = ProjectionMode::from_perspective(on)
            }
            _ => {}
        }
    }

    /// Replace all settings. Call [`Viewer::rebuild`] afterwards if the
    /// construction fields changed.
    pub fn replace_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.projector.mode = ProjectionMode::from_perspective(self.settings.show_perspective);
        self.projector.set_depth(self.width, self.settings.depth);
    }

    /// Compose the current frame
    pub fn draw(&mut self) -> DrawList {
        draw::draw(&mut self.wireframe, &self.settings, &self.projector)
    }

    /// Compose the current frame and hand it to `sink`
    pub fn display(&mut self, sink: &mut dyn FrameSink) {
        let frame = self.draw();
        sink.display(&frame);
    }

    /// Execute one action.
    ///
    /// `SetVisible` only redraws: the caller decides whether the setting is
    /// applied. `Reset` and `Playback` belong to the session and do nothing
    /// here.
    pub fn take_action(
        &mut self,
        action: Action,
        sink: &mut dyn FrameSink,
    ) -> Result<ActionResult, EngineError> {
        self.cancel.reset();
        let acted = ActionResult {
            acted: true,
            rebuilt: false,
        };

        match action {
            Action::Rotate {
                dim1,
                dim2,
                dim3,
                sign,
            } => {
                let theta = sign.apply(self.settings.rotation_radians());
                self.rotate_all(dim1, dim2, dim3, theta, sink)?;
                Ok(acted)
            }
            Action::Move(direction) => {
                self.translate_all(direction, sink);
                Ok(acted)
            }
            Action::Zoom(sign) => {
                let factor = match sign {
                    Sign::Plus => ZOOM_FACTOR,
                    Sign::Minus => 1.0 / ZOOM_FACTOR,
                };
                self.scale_all(factor, sink);
                Ok(acted)
            }
            Action::SetVisible(_) => {
                self.display(sink);
                Ok(acted)
            }
            Action::SetDims(dims) => {
                let previous = self.settings.dims;
                self.settings.dims = dims;
                if let Err(err) = self.rebuild() {
                    self.settings.dims = previous;
                    return Err(err.into());
                }
                self.display(sink);
                Ok(ActionResult {
                    acted: true,
                    rebuilt: true,
                })
            }
            Action::Reset(_) | Action::Playback => Ok(ActionResult::default()),
        }
    }

    /// Rotate by `theta` radians, animating when steps are shown
    pub fn rotate_all(
        &mut self,
        dim1: usize,
        dim2: usize,
        dim3: Option<usize>,
        theta: f64,
        sink: &mut dyn FrameSink,
    ) -> Result<StepOutcome, EngineError> {
        let dims = self.settings.dims;
        for axis in [Some(dim1), Some(dim2), dim3].into_iter().flatten() {
            if axis >= dims {
                return Err(EngineError::AxisOutOfRange { axis, dims });
            }
        }
        if dim1 == dim2 || dim3 == Some(dim1) || dim3 == Some(dim2) {
            return Err(EngineError::DegeneratePlane(dim1));
        }

        let count = if self.settings.show_steps {
            self.settings.rotation_steps()
        } else {
            1
        };
        let request = RotateRequest::new(dim1, dim2, theta)
            .with_third(dim3)
            .with_auto_scale(self.settings.auto_scale, self.motion_steps());
        log::debug!(
            "Rotating ({}, {}, {:?}) by {:.4} rad in {} steps",
            dim1,
            dim2,
            dim3,
            theta,
            count
        );

        let Self {
            wireframe,
            settings,
            projector,
            cancel,
            ..
        } = self;
        Ok(stepper::rotate(wireframe, request, count, cancel, |wf| {
            sink.display(&draw::draw(wf, settings, projector))
        }))
    }

    /// Scale about the center by `factor`
    pub fn scale_all(&mut self, factor: f64, sink: &mut dyn FrameSink) -> StepOutcome {
        let count = self.motion_steps();
        let Self {
            wireframe,
            settings,
            projector,
            cancel,
            ..
        } = self;
        stepper::scale(wireframe, factor, count, cancel, |wf| {
            sink.display(&draw::draw(wf, settings, projector))
        })
    }

    /// Move one step in `direction`
    pub fn translate_all(&mut self, direction: Direction, sink: &mut dyn FrameSink) -> StepOutcome {
        let (axis, amount) = direction.offset();
        let count = self.motion_steps();
        let Self {
            wireframe,
            settings,
            projector,
            cancel,
            ..
        } = self;
        stepper::translate(wireframe, axis, amount, count, cancel, |wf| {
            sink.display(&draw::draw(wf, settings, projector))
        })
    }

    fn motion_steps(&self) -> usize {
        if self.settings.show_steps {
            MOTION_STEPS
        } else {
            1
        }
    }
}

/// Build a wireframe and projector that fit the viewport in `settings`
fn layout(
    settings: &Settings,
    face_colors: &mut FaceColors,
) -> Result<(Wireframe, Projector, u32), SettingsError> {
    if !(crate::MIN_DIMS..=crate::MAX_DIMS).contains(&settings.dims) {
        return Err(SettingsError::DimsOutOfRange(settings.dims));
    }
    let (width, height) = settings.view_size()?;
    let ratios = settings.aspect_ratios()?;
    let layout = Layout::for_view(settings.dims, &ratios, width, height);
    let wireframe =
        Wireframe::build_with_colors(settings.dims, &layout.origin, &layout.sizes, face_colors);
    let projector = Projector::new(
        ProjectionMode::from_perspective(settings.show_perspective),
        VanishingPoint::for_view(width, height, settings.depth),
    );
    Ok((wireframe, projector, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::DirtyFlags;

    fn viewer() -> Viewer {
        Viewer::new(Settings::default()).unwrap()
    }

    #[test]
    fn test_new_centers_wireframe() {
        let v = viewer();
        let center = v.wireframe().center();
        assert_eq!(center.len(), 4);
        assert!((center[0] - 500.0).abs() < 1e-9);
        assert!((center[1] - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = Settings {
            viewer_size: "big".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            Viewer::new(settings),
            Err(SettingsError::InvalidViewerSize(_))
        ));
    }

    #[test]
    fn test_rotate_draws_two_frames_per_degree() {
        let mut v = viewer();
        let mut frames = 0;
        let result = v
            .take_action(Action::rotate(0, 1, Sign::Plus), &mut |_: &DrawList| frames += 1)
            .unwrap();
        assert!(result.acted);
        assert_eq!(frames, 30);
    }

    #[test]
    fn test_hidden_steps_draw_once() {
        let mut v = viewer();
        v.apply_setting(Setting::ShowSteps(false));
        let mut frames = 0;
        v.take_action(Action::Zoom(Sign::Plus), &mut |_: &DrawList| frames += 1)
            .unwrap();
        v.take_action(Action::Move(Direction::Up), &mut |_: &DrawList| frames += 1)
            .unwrap();
        assert_eq!(frames, 2);
        assert!((v.wireframe().center()[1] - 460.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_in_then_out_restores_size() {
        let mut v = viewer();
        let before = v.wireframe().nodes().clone();
        let mut sink = |_: &DrawList| {};
        v.take_action(Action::Zoom(Sign::Plus), &mut sink).unwrap();
        v.take_action(Action::Zoom(Sign::Minus), &mut sink).unwrap();
        assert!(v.wireframe().nodes().max_abs_diff(&before) < 1e-9);
    }

    #[test]
    fn test_rotation_rejects_bad_axes() {
        let mut v = viewer();
        let mut sink = |_: &DrawList| {};
        assert_eq!(
            v.take_action(Action::rotate(0, 4, Sign::Plus), &mut sink),
            Err(EngineError::AxisOutOfRange { axis: 4, dims: 4 })
        );
        assert_eq!(
            v.take_action(Action::rotate(2, 2, Sign::Plus), &mut sink),
            Err(EngineError::DegeneratePlane(2))
        );
    }

    #[test]
    fn test_set_dims_rebuilds() {
        let mut v = viewer();
        let mut sink = |_: &DrawList| {};
        let result = v.take_action(Action::SetDims(5), &mut sink).unwrap();
        assert!(result.rebuilt);
        assert_eq!(v.wireframe().nodes().len(), 32);

        assert!(v.take_action(Action::SetDims(11), &mut sink).is_err());
        assert_eq!(v.settings().dims, 5);
    }

    #[test]
    fn test_session_actions_are_ignored() {
        let mut v = viewer();
        let mut frames = 0;
        let result = v
            .take_action(Action::Playback, &mut |_: &DrawList| frames += 1)
            .unwrap();
        assert!(!result.acted);
        assert_eq!(frames, 0);
    }

    #[test]
    fn test_depth_setting_moves_vanishing_point() {
        let mut v = viewer();
        v.apply_setting(Setting::Depth(4.0));
        assert_eq!(v.projector().vanishing_point.z, 4000.0);
        v.apply_setting(Setting::ShowPerspective(true));
        assert_eq!(v.projector().mode, ProjectionMode::Perspective);
    }

    #[test]
    fn test_display_sorts_lazily() {
        let mut v = viewer();
        let mut frames = Vec::new();
        v.display(&mut |f: &DrawList| frames.push(f.len()));
        assert_eq!(frames, vec![32]);
        assert_eq!(v.wireframe().dirty(), DirtyFlags::FACES);
    }

    #[test]
    fn test_cancel_during_rotation() {
        let mut v = viewer();
        let token = v.cancel_token();
        let mut frames = 0;
        v.take_action(Action::rotate(0, 1, Sign::Plus), &mut |_: &DrawList| {
            frames += 1;
            if frames == 5 {
                token.cancel();
            }
        })
        .unwrap();
        assert_eq!(frames, 5);
    }
}
