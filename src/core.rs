use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque colour from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
        )
    }

    pub fn to_hex(self) -> u32 {
        let ch = |v: f32| ((v.clamp(0.0, 1.0) * 255.0).round() as u32) & 0xff;
        (ch(self.r) << 16) | (ch(self.g) << 8) | ch(self.b)
    }

    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
}

impl From<Color> for bevy::prelude::Color {
    #[inline]
    fn from(c: Color) -> Self {
        bevy::prelude::Color::srgba(c.r, c.g, c.b, c.a)
    }
}

/// Whether the Z axis, the XZ/YZ grid planes and the Z labels are shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    #[serde(rename = "2d")]
    TwoD,
    #[default]
    #[serde(rename = "3d")]
    ThreeD,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::TwoD => DisplayMode::ThreeD,
            DisplayMode::ThreeD => DisplayMode::TwoD,
        }
    }

    pub fn is_3d(self) -> bool {
        matches!(self, DisplayMode::ThreeD)
    }

    /// Axes that carry labels in this mode.
    pub fn axes(self) -> &'static [Axis] {
        match self {
            DisplayMode::TwoD => &[Axis::X, Axis::Y],
            DisplayMode::ThreeD => &[Axis::X, Axis::Y, Axis::Z],
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::TwoD => f.write_str("2d"),
            DisplayMode::ThreeD => f.write_str("3d"),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2d" | "2" | "twod" => Ok(DisplayMode::TwoD),
            "3d" | "3" | "threed" => Ok(DisplayMode::ThreeD),
            other => Err(format!("unknown display mode '{other}', expected 2d or 3d")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }
}

/// Plane a grid lies in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    XY,
    XZ,
    YZ,
}

impl Orientation {
    /// In-plane axes `(u, v)` and the plane normal.
    pub fn basis(self) -> (DVec3, DVec3, DVec3) {
        match self {
            Orientation::XY => (DVec3::X, DVec3::Y, DVec3::Z),
            Orientation::XZ => (DVec3::X, DVec3::Z, DVec3::Y),
            Orientation::YZ => (DVec3::Y, DVec3::Z, DVec3::X),
        }
    }
}

/// One square grid, centred on the origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridPlane {
    pub orientation: Orientation,
    pub tier: usize,
    pub color: Color,
    /// Edge length in grid-local units.
    pub size: f64,
    pub divisions: u32,
    /// Shift along the plane normal.
    pub offset: f64,
}

impl GridPlane {
    /// Line segments of this grid in grid-local space: `divisions + 1` lines in
    /// each in-plane direction.
    pub fn segments(&self) -> Vec<(DVec3, DVec3)> {
        let (u, v, n) = self.orientation.basis();
        let half = self.size * 0.5;
        let shift = n * self.offset;
        let divisions = self.divisions.max(1);
        let step = self.size / divisions as f64;

        let mut out = Vec::with_capacity(2 * (divisions as usize + 1));
        for k in 0..=divisions {
            let t = -half + k as f64 * step;
            out.push((u * t - v * half + shift, u * t + v * half + shift));
            out.push((v * t - u * half + shift, v * t + u * half + shift));
        }
        out
    }
}

/// Every grid plane on screen for one (scale, mode) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSet {
    pub scale: f64,
    pub mode: DisplayMode,
    pub planes: Vec<GridPlane>,
}

impl GridSet {
    /// Uniform factor applied to the whole grid group.
    pub fn content_scale(&self) -> f64 {
        self.scale
    }

    pub fn count(&self, orientation: Orientation) -> usize {
        self.planes
            .iter()
            .filter(|p| p.orientation == orientation)
            .count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub axis: Axis,
    pub text: String,
    pub value: f64,
    pub position: DVec3,
    /// Width of the label quad; its height is half of that.
    pub base_size: f64,
}

/// Resolution used to rasterise label glyphs at a given scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    pub texture_width: f64,
    pub texture_height: f64,
    pub font_size: f64,
}

impl GlyphMetrics {
    /// Share of the label quad's height covered by the glyphs.
    pub fn text_fraction(&self) -> f64 {
        if self.texture_height <= 0.0 {
            return 0.0;
        }
        (self.font_size / self.texture_height).min(1.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelSet {
    pub scale: f64,
    pub mode: DisplayMode,
    pub labels: Vec<Label>,
    pub glyph: GlyphMetrics,
}

impl LabelSet {
    pub fn on_axis(&self, axis: Axis) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(move |l| l.axis == axis)
    }
}

/// Sampled polyline of a plotted expression, points are `(x, f(x), 0)`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotCurve {
    pub expression: String,
    pub points: Vec<DVec3>,
}

impl PlotCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point_at(&self, x: f64, tolerance: f64) -> Option<DVec3> {
        let idx = self.points.partition_point(|p| p.x < x - tolerance);
        self.points
            .get(idx)
            .copied()
            .filter(|p| (p.x - x).abs() <= tolerance)
    }
}

/// One coloured axis line with its arrowhead.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisLine {
    pub axis: Axis,
    pub color: Color,
    pub start: DVec3,
    pub end: DVec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrowhead {
    pub radius: f64,
    pub height: f64,
    pub segments: u32,
}

/// The fixed X/Y/Z axes drawn from the origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxesGroup {
    pub lines: [AxisLine; 3],
    pub arrowhead: Arrowhead,
}

impl AxesGroup {
    pub fn new(length: f64, arrowhead: Arrowhead) -> Self {
        let line = |axis: Axis, color: Color| AxisLine {
            axis,
            color,
            start: DVec3::ZERO,
            end: axis.unit() * length,
        };
        Self {
            lines: [
                line(Axis::X, Color::RED),
                line(Axis::Y, Color::GREEN),
                line(Axis::Z, Color::BLUE),
            ],
            arrowhead,
        }
    }

    /// Only the Z line and its arrowhead depend on the display mode.
    pub fn is_visible(axis: Axis, mode: DisplayMode) -> bool {
        axis != Axis::Z || mode.is_3d()
    }
}

/// World-space size of a billboarded label, width then height.
pub type LabelSize = DVec2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips() {
        for hex in [0x555555, 0x444444, 0x333333, 0x222222, 0x00ff00, 0x404040] {
            assert_eq!(Color::hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn mode_parses_from_cli_strings() {
        assert_eq!("2D".parse::<DisplayMode>(), Ok(DisplayMode::TwoD));
        assert_eq!("3d".parse::<DisplayMode>(), Ok(DisplayMode::ThreeD));
        assert!("4d".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn grid_segments_stay_in_plane() {
        let plane = GridPlane {
            orientation: Orientation::YZ,
            tier: 0,
            color: Color::WHITE,
            size: 10.0,
            divisions: 10,
            offset: -0.0001,
        };
        let segs = plane.segments();
        assert_eq!(segs.len(), 22);
        for (a, b) in segs {
            assert_eq!(a.x, -0.0001);
            assert_eq!(b.x, -0.0001);
            assert!(a.y.abs() <= 5.0 && a.z.abs() <= 5.0);
        }
    }

    #[test]
    fn curve_lookup_respects_tolerance() {
        let curve = PlotCurve {
            expression: "x".into(),
            points: vec![DVec3::new(-1.0, -1.0, 0.0), DVec3::new(1.0, 1.0, 0.0)],
        };
        assert!(curve.point_at(1.0, 1e-9).is_some());
        assert!(curve.point_at(0.0, 1e-9).is_none());
    }
}
