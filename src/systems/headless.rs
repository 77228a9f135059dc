//! Headless rendering system
//!
//! Consumes frames without drawing them, keeping enough statistics to tell
//! what a real renderer would have shown.

use hypercube_core::{DrawList, FrameSink, Primitive};

/// Totals over every frame received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: usize,
    /// Frames that start from a cleared canvas (no ghosting)
    pub cleared: usize,
    pub lines: usize,
    pub polygons: usize,
    pub circles: usize,
    pub labels: usize,
    /// Points that fell outside the viewport
    pub off_screen: usize,
}

/// Frame sink that renders nowhere
pub struct HeadlessRenderer {
    width: i32,
    height: i32,
    log_frames: bool,
    stats: FrameStats,
    last_frame: Option<DrawList>,
}

impl HeadlessRenderer {
    /// Create a renderer for a `width` x `height` viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            log_frames: false,
            stats: FrameStats::default(),
            last_frame: None,
        }
    }

    /// Log a line for every frame
    pub fn with_frame_logging(mut self, enabled: bool) -> Self {
        self.log_frames = enabled;
        self
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// The most recent frame, if any
    pub fn last_frame(&self) -> Option<&DrawList> {
        self.last_frame.as_ref()
    }

    fn on_screen(&self, (x, y): (i32, i32)) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }
}

impl FrameSink for HeadlessRenderer {
    fn display(&mut self, frame: &DrawList) {
        self.stats.frames += 1;
        if frame.fade == 0.0 {
            self.stats.cleared += 1;
        }

        let mut off_screen = 0;
        for primitive in &frame.primitives {
            match primitive {
                Primitive::Line { from, to, .. } => {
                    self.stats.lines += 1;
                    off_screen += [*from, *to].iter().filter(|p| !self.on_screen(**p)).count();
                }
                Primitive::Polygon { points, .. } => {
                    self.stats.polygons += 1;
                    off_screen += points.iter().filter(|p| !self.on_screen(**p)).count();
                }
                Primitive::Circle { center, .. } => {
                    self.stats.circles += 1;
                    if !self.on_screen(*center) {
                        off_screen += 1;
                    }
                }
                Primitive::Label { .. } => self.stats.labels += 1,
            }
        }
        self.stats.off_screen += off_screen;

        if self.log_frames {
            log::debug!(
                "Frame {}: {} primitives, fade {:.2}, {} points off screen",
                self.stats.frames,
                frame.len(),
                frame.fade,
                off_screen
            );
        }
        self.last_frame = Some(frame.clone());
    }
}
