//! Viewer settings
//!
//! Everything the engine reads from the user's configuration lives in one
//! typed [`Settings`] struct. Values are checked once with
//! [`Settings::validate`] before they reach the engine; the engine itself
//! assumes they are in range.
//!
//! A [`Setting`] is one field together with a new value. It is what a
//! visibility action carries, and what the action log merges on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest supported dimension count
pub const MIN_DIMS: usize = 3;
/// Largest supported dimension count
pub const MAX_DIMS: usize = 10;
/// Smallest accepted viewport side in pixels
pub const MIN_VIEW_SIZE: u32 = 100;
/// Largest accepted viewport side in pixels
pub const MAX_VIEW_SIZE: u32 = 4096;

/// Frame fade for each ghost slider position (0 = clear every frame)
const GHOST_TO_FACTOR: [f64; 11] = [0.0, 0.6, 0.7, 0.75, 0.8, 0.85, 0.9, 0.95, 0.98, 0.99, 1.0];

/// All user-facing settings, with factory defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // How the wireframe is constructed
    /// Number of dimensions (3..=10)
    pub dims: usize,
    /// Aspect ratios per axis, e.g. `"1:1"` or `"3:2:1"`
    pub aspects: String,
    /// Viewport size, e.g. `"1000x1000"`
    pub viewer_size: String,

    // How the wireframe is displayed
    pub show_faces: bool,
    pub show_edges: bool,
    pub show_nodes: bool,
    /// Animate intermediate steps instead of jumping
    pub show_steps: bool,
    pub show_center: bool,
    pub show_perspective: bool,
    /// Show the vanishing point marker
    pub show_vp: bool,
    /// Perspective depth as a multiple of the viewport width (2.0..=10.0)
    pub depth: f64,
    /// Ghosting slider position (0..=10)
    pub ghost: u8,
    /// Face opacity (1.0 = opaque)
    pub opacity: f64,
    pub node_radius: u32,
    pub center_radius: u32,
    pub vp_radius: u32,
    pub edge_width: u32,
    pub font_size: f64,
    pub show_coords: bool,
    pub show_node_ids: bool,
    /// Draw edges beyond the first three dimensions one pixel wide
    pub show_4_narrow: bool,
    /// Draw edges beyond the first three dimensions in gray
    pub show_4_gray: bool,

    // How the wireframe is rotated
    /// Degrees per rotation request (1..=20)
    pub angle: u32,
    /// Size change spread over each rotation (1.0 = none)
    pub auto_scale: f64,

    /// Frame rate of recordings
    pub frame_rate: u32,
    /// Replay also replays visibility changes
    pub replay_visible: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dims: 4,
            aspects: "1:1".to_string(),
            viewer_size: "1000x1000".to_string(),
            show_faces: false,
            show_edges: true,
            show_nodes: false,
            show_steps: true,
            show_center: false,
            show_perspective: false,
            show_vp: false,
            depth: 2.0,
            ghost: 0,
            opacity: 1.0,
            node_radius: 4,
            center_radius: 1,
            vp_radius: 2,
            edge_width: 3,
            font_size: 0.4,
            show_coords: false,
            show_node_ids: false,
            show_4_narrow: false,
            show_4_gray: false,
            angle: 15,
            auto_scale: 1.0,
            frame_rate: 30,
            replay_visible: true,
        }
    }
}

impl Settings {
    /// Check every constrained field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_DIMS..=MAX_DIMS).contains(&self.dims) {
            return Err(SettingsError::DimsOutOfRange(self.dims));
        }
        parse_aspects(&self.aspects)?;
        parse_viewer_size(&self.viewer_size)?;
        check_range("angle", self.angle as f64, 1.0, 20.0)?;
        check_range("ghost", self.ghost as f64, 0.0, 10.0)?;
        check_range("depth", self.depth, 2.0, 10.0)?;
        check_range("opacity", self.opacity, 0.0, 1.0)?;
        check_range("auto_scale", self.auto_scale, 0.5, 2.0)?;
        Ok(())
    }

    /// Parsed viewport size
    pub fn view_size(&self) -> Result<(u32, u32), SettingsError> {
        parse_viewer_size(&self.viewer_size)
    }

    /// Parsed aspect ratios
    pub fn aspect_ratios(&self) -> Result<Vec<u32>, SettingsError> {
        parse_aspects(&self.aspects)
    }

    /// Rotation per request in radians
    pub fn rotation_radians(&self) -> f64 {
        (self.angle as f64).to_radians()
    }

    /// Animation steps per rotation: two per degree
    pub fn rotation_steps(&self) -> usize {
        self.angle as usize * 2
    }

    /// How much of the previous frame survives into the next
    pub fn ghost_factor(&self) -> f64 {
        GHOST_TO_FACTOR[(self.ghost as usize).min(GHOST_TO_FACTOR.len() - 1)]
    }

    /// Store a new value for one field
    pub fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::ShowFaces(v) => self.show_faces = v,
            Setting::ShowEdges(v) => self.show_edges = v,
            Setting::ShowNodes(v) => self.show_nodes = v,
            Setting::ShowCoords(v) => self.show_coords = v,
            Setting::ShowSteps(v) => self.show_steps = v,
            Setting::ShowCenter(v) => self.show_center = v,
            Setting::ShowPerspective(v) => self.show_perspective = v,
            Setting::ShowVp(v) => self.show_vp = v,
            Setting::Depth(v) => self.depth = v,
            Setting::Ghost(v) => self.ghost = v,
            Setting::Angle(v) => self.angle = v,
            Setting::AutoScale(v) => self.auto_scale = v,
            Setting::ReplayVisible(v) => self.replay_visible = v,
            Setting::FrameRate(v) => self.frame_rate = v,
        }
    }

    /// Current value of one field
    pub fn get(&self, field: SettingField) -> Setting {
        match field {
            SettingField::ShowFaces => Setting::ShowFaces(self.show_faces),
            SettingField::ShowEdges => Setting::ShowEdges(self.show_edges),
            SettingField::ShowNodes => Setting::ShowNodes(self.show_nodes),
            SettingField::ShowCoords => Setting::ShowCoords(self.show_coords),
            SettingField::ShowSteps => Setting::ShowSteps(self.show_steps),
            SettingField::ShowCenter => Setting::ShowCenter(self.show_center),
            SettingField::ShowPerspective => Setting::ShowPerspective(self.show_perspective),
            SettingField::ShowVp => Setting::ShowVp(self.show_vp),
            SettingField::Depth => Setting::Depth(self.depth),
            SettingField::Ghost => Setting::Ghost(self.ghost),
            SettingField::Angle => Setting::Angle(self.angle),
            SettingField::AutoScale => Setting::AutoScale(self.auto_scale),
            SettingField::ReplayVisible => Setting::ReplayVisible(self.replay_visible),
            SettingField::FrameRate => Setting::FrameRate(self.frame_rate),
        }
    }

    /// Copy `saved` back over these settings, keeping the current replay
    /// mode and frame rate (the user may have changed them on purpose).
    pub fn restore_from(&mut self, saved: &Settings) {
        let replay_visible = self.replay_visible;
        let frame_rate = self.frame_rate;
        *self = saved.clone();
        self.replay_visible = replay_visible;
        self.frame_rate = frame_rate;
    }
}

/// A settings field that visibility actions can change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    ShowFaces,
    ShowEdges,
    ShowNodes,
    ShowCoords,
    ShowSteps,
    ShowCenter,
    ShowPerspective,
    ShowVp,
    Depth,
    Ghost,
    Angle,
    AutoScale,
    ReplayVisible,
    FrameRate,
}

impl SettingField {
    /// Fields driven by continuous sliders
    pub const SLIDERS: [SettingField; 4] = [
        SettingField::Depth,
        SettingField::Ghost,
        SettingField::Angle,
        SettingField::AutoScale,
    ];

    /// Name used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            SettingField::ShowFaces => "show_faces",
            SettingField::ShowEdges => "show_edges",
            SettingField::ShowNodes => "show_nodes",
            SettingField::ShowCoords => "show_coords",
            SettingField::ShowSteps => "show_steps",
            SettingField::ShowCenter => "show_center",
            SettingField::ShowPerspective => "show_perspective",
            SettingField::ShowVp => "show_vp",
            SettingField::Depth => "depth",
            SettingField::Ghost => "ghost",
            SettingField::Angle => "angle",
            SettingField::AutoScale => "auto_scale",
            SettingField::ReplayVisible => "replay_visible",
            SettingField::FrameRate => "frame_rate",
        }
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One settings field with its new value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    ShowFaces(bool),
    ShowEdges(bool),
    ShowNodes(bool),
    ShowCoords(bool),
    ShowSteps(bool),
    ShowCenter(bool),
    ShowPerspective(bool),
    ShowVp(bool),
    Depth(f64),
    Ghost(u8),
    Angle(u32),
    AutoScale(f64),
    ReplayVisible(bool),
    FrameRate(u32),
}

impl Setting {
    /// The field this value belongs to
    pub fn field(&self) -> SettingField {
        match self {
            Setting::ShowFaces(_) => SettingField::ShowFaces,
            Setting::ShowEdges(_) => SettingField::ShowEdges,
            Setting::ShowNodes(_) => SettingField::ShowNodes,
            Setting::ShowCoords(_) => SettingField::ShowCoords,
            Setting::ShowSteps(_) => SettingField::ShowSteps,
            Setting::ShowCenter(_) => SettingField::ShowCenter,
            Setting::ShowPerspective(_) => SettingField::ShowPerspective,
            Setting::ShowVp(_) => SettingField::ShowVp,
            Setting::Depth(_) => SettingField::Depth,
            Setting::Ghost(_) => SettingField::Ghost,
            Setting::Angle(_) => SettingField::Angle,
            Setting::AutoScale(_) => SettingField::AutoScale,
            Setting::ReplayVisible(_) => SettingField::ReplayVisible,
            Setting::FrameRate(_) => SettingField::FrameRate,
        }
    }
}

/// Parse aspect ratios such as `"16:9"` or `"1:2:3"`.
///
/// At least two ratios, each one or two digits.
pub fn parse_aspects(aspects: &str) -> Result<Vec<u32>, SettingsError> {
    let invalid = || SettingsError::InvalidAspects(aspects.to_string());
    let parts: Vec<&str> = aspects.split(':').collect();
    if parts.len() < 2 {
        return Err(invalid());
    }
    parts
        .iter()
        .map(|p| {
            let ok = (1..=2).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit());
            if ok {
                p.parse::<u32>().map_err(|_| invalid())
            } else {
                Err(invalid())
            }
        })
        .collect()
}

/// Parse a viewport size such as `"1000x800"`, `"1000 X 800"` or `"1000:800"`.
///
/// Both sides must lie in `MIN_VIEW_SIZE..=MAX_VIEW_SIZE`.
pub fn parse_viewer_size(size: &str) -> Result<(u32, u32), SettingsError> {
    let invalid = || SettingsError::InvalidViewerSize(size.to_string());
    let mut parts = size.split(|c| c == 'x' || c == 'X' || c == ':');
    let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let number = |s: &str| {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<u32>().map_err(|_| invalid())
    };
    let (width, height) = (number(w)?, number(h)?);

    let range = MIN_VIEW_SIZE..=MAX_VIEW_SIZE;
    if !range.contains(&width) || !range.contains(&height) {
        return Err(SettingsError::ViewerSizeOutOfRange { width, height });
    }
    Ok((width, height))
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), SettingsError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange { field, value })
    }
}

/// Error type for settings validation
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Dimension count outside `MIN_DIMS..=MAX_DIMS`
    DimsOutOfRange(usize),
    /// Aspect string is not of the form `a:b[:c...]`
    InvalidAspects(String),
    /// Viewer size string is not of the form `WxH`
    InvalidViewerSize(String),
    /// Viewer size parsed but a side is too small or too large
    ViewerSizeOutOfRange { width: u32, height: u32 },
    /// A numeric field is outside its allowed range
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::DimsOutOfRange(dims) => write!(
                f,
                "Dimension count {} is outside {}..={}",
                dims, MIN_DIMS, MAX_DIMS
            ),
            SettingsError::InvalidAspects(s) => write!(f, "Invalid aspect ratios: '{}'", s),
            SettingsError::InvalidViewerSize(s) => write!(f, "Invalid viewer size: '{}'", s),
            SettingsError::ViewerSizeOutOfRange { width, height } => write!(
                f,
                "Viewer size {}x{} is outside {}..={} pixels",
                width, height, MIN_VIEW_SIZE, MAX_VIEW_SIZE
            ),
            SettingsError::OutOfRange { field, value } => {
                write!(f, "Setting '{}' is out of range: {}", field, value)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.view_size(), Ok((1000, 1000)));
        assert_eq!(settings.rotation_steps(), 30);
    }

    #[test]
    fn test_parse_aspects() {
        assert_eq!(parse_aspects("1:1"), Ok(vec![1, 1]));
        assert_eq!(parse_aspects("16:9:4"), Ok(vec![16, 9, 4]));
        assert!(parse_aspects("1").is_err());
        assert!(parse_aspects("1:").is_err());
        assert!(parse_aspects("100:1").is_err());
        assert!(parse_aspects("a:b").is_err());
        assert!(parse_aspects(" 1:1").is_err());
    }

    #[test]
    fn test_parse_viewer_size() {
        assert_eq!(parse_viewer_size("1000x800"), Ok((1000, 800)));
        assert_eq!(parse_viewer_size(" 640 X 480 "), Ok((640, 480)));
        assert_eq!(parse_viewer_size("300:200"), Ok((300, 200)));
        assert!(matches!(
            parse_viewer_size("1000x"),
            Err(SettingsError::InvalidViewerSize(_))
        ));
        assert!(parse_viewer_size("10x10x10").is_err());
        assert!(parse_viewer_size("-5x100").is_err());
        assert_eq!(
            parse_viewer_size("5000x100"),
            Err(SettingsError::ViewerSizeOutOfRange { width: 5000, height: 100 })
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut settings = Settings::default();
        settings.dims = 11;
        assert_eq!(settings.validate(), Err(SettingsError::DimsOutOfRange(11)));

        let mut settings = Settings::default();
        settings.angle = 0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::OutOfRange { field: "angle", .. })
        ));

        let mut settings = Settings::default();
        settings.depth = f64::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_apply_and_get_round_trip() {
        let mut settings = Settings::default();
        settings.apply(Setting::Ghost(7));
        settings.apply(Setting::ShowFaces(true));
        assert_eq!(settings.get(SettingField::Ghost), Setting::Ghost(7));
        assert_eq!(settings.get(SettingField::ShowFaces), Setting::ShowFaces(true));
        assert_eq!(Setting::Ghost(7).field(), SettingField::Ghost);
    }

    #[test]
    fn test_ghost_factor_table() {
        let mut settings = Settings::default();
        assert_eq!(settings.ghost_factor(), 0.0);
        settings.ghost = 3;
        assert_eq!(settings.ghost_factor(), 0.75);
        settings.ghost = 10;
        assert_eq!(settings.ghost_factor(), 1.0);
    }

    #[test]
    fn test_restore_keeps_replay_mode_and_frame_rate() {
        let saved = Settings::default();
        let mut current = Settings::default();
        current.ghost = 5;
        current.replay_visible = false;
        current.frame_rate = 60;
        current.restore_from(&saved);
        assert_eq!(current.ghost, 0);
        assert!(!current.replay_visible);
        assert_eq!(current.frame_rate, 60);
    }

    #[test]
    fn test_rotation_radians() {
        let settings = Settings::default();
        assert!((settings.rotation_radians() - std::f64::consts::PI / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();
        let text = toml::to_string(&settings).unwrap();
        assert!(text.contains("aspects"));
        assert!(text.contains("replay_visible"));

        let partial: Settings = toml::from_str("dims = 6\nghost = 2").unwrap();
        assert_eq!(partial.dims, 6);
        assert_eq!(partial.ghost, 2);
        assert_eq!(partial.angle, 15);
    }

    #[test]
    fn test_error_display() {
        let err = SettingsError::InvalidAspects("1".to_string());
        assert!(err.to_string().contains("aspect"));
        let err = SettingsError::OutOfRange { field: "depth", value: 50.0 };
        assert!(err.to_string().contains("depth"));
    }

    #[test]
    fn test_field_names() {
        assert_eq!(SettingField::AutoScale.name(), "auto_scale");
        assert_eq!(SettingField::ShowVp.to_string(), "show_vp");
    }
}
