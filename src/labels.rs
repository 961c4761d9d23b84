//! Numeric axis labels: which values get a label, where they sit, and how big
//! they are drawn from a given camera pose.

use glam::{DQuat, DVec2, DVec3};

use crate::config::LabelConfig;
use crate::core::{Axis, DisplayMode, GlyphMetrics, Label, LabelSet, LabelSize};

#[derive(Clone, Debug, PartialEq)]
pub struct LabelBuilder {
    config: LabelConfig,
}

impl Default for LabelBuilder {
    fn default() -> Self {
        Self::new(&LabelConfig::default())
    }
}

impl LabelBuilder {
    pub fn new(config: &LabelConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// `log10(scale + 1)`, the growth applied to label sizes and glyph resolution.
    fn magnitude(scale: f64) -> f64 {
        (scale + 1.0).log10()
    }

    pub fn base_size(&self, scale: f64) -> f64 {
        self.config.base_size * Self::magnitude(scale)
    }

    pub fn glyph_metrics(&self, scale: f64) -> GlyphMetrics {
        let m = Self::magnitude(scale);
        let texture_width = (self.config.texture_base * m).min(self.config.texture_max);
        GlyphMetrics {
            texture_width,
            texture_height: texture_width / 2.0,
            font_size: (self.config.font_base * m).min(self.config.font_max),
        }
    }

    /// Label values: `steps + 1` evenly spaced points across `±range_factor * scale`,
    /// dropping those closer to the origin than one scale unit.
    pub fn values(&self, scale: f64) -> Vec<f64> {
        let visible = scale * self.config.range_factor;
        let steps = ((visible / scale).floor() as u32).min(self.config.max_steps);
        if steps == 0 {
            return Vec::new();
        }

        (0..=steps)
            .map(|i| -visible + 2.0 * visible * (f64::from(i) / f64::from(steps)))
            .filter(|v| v.abs() >= scale)
            .collect()
    }

    /// Fresh label set; earlier sets are never patched.
    pub fn build(&self, scale: f64, mode: DisplayMode) -> LabelSet {
        let offset = self.config.axis_offset;
        let base_size = self.base_size(scale);
        let values = self.values(scale);

        let mut labels = Vec::with_capacity(values.len() * mode.axes().len());
        for value in values {
            let text = format_value(value);
            for &axis in mode.axes() {
                let position = match axis {
                    Axis::X => DVec3::new(value, offset, 0.0),
                    Axis::Y => DVec3::new(offset, value, 0.0),
                    Axis::Z => DVec3::new(0.0, offset, value),
                };
                labels.push(Label {
                    axis,
                    text: text.clone(),
                    value,
                    position,
                    base_size,
                });
            }
        }

        LabelSet {
            scale,
            mode,
            labels,
            glyph: self.glyph_metrics(scale),
        }
    }
}

/// Nearest integer, halves rounded towards positive infinity.
pub fn format_value(value: f64) -> String {
    let rounded = (value + 0.5).floor();
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.0}")
}

/// Where the camera is and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl CameraPose {
    pub fn distance(&self) -> f64 {
        self.position.length()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelTransform {
    pub translation: DVec3,
    pub rotation: DQuat,
    pub size: LabelSize,
}

/// `max(1, log10(distance))`.
pub fn distance_factor(distance: f64) -> f64 {
    if !(distance > 0.0) {
        return 1.0;
    }
    distance.log10().max(1.0)
}

/// Per-frame transform of a label: camera-facing, grown with camera distance.
pub fn label_transform(pose: &CameraPose, label: &Label) -> LabelTransform {
    let width = label.base_size * distance_factor(pose.distance());
    LabelTransform {
        translation: label.position,
        rotation: pose.rotation,
        size: DVec2::new(width, width / 2.0),
    }
}
