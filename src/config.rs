//! Scene configuration: JSON file, command line, and their defaults

use std::path::{Path, PathBuf};

use clap::Parser;
use error_stack::{Report, ResultExt};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::{Color, DisplayMode};
use crate::plotter::MAX_SAMPLES;
use crate::{AxiscopeError, Result};

/// Interactive 2D/3D axis explorer
#[derive(Parser, Clone, Debug, Default)]
#[command(name = "axiscope")]
#[command(about = "Explore coordinate axes across orders of magnitude and plot functions of x")]
pub struct Config {
    /// Scene configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Expression to plot at startup, e.g. "x^2"
    #[arg(short, long)]
    pub function: Option<String>,

    /// Initial display mode (2d or 3d)
    #[arg(short, long)]
    pub mode: Option<DisplayMode>,

    /// Log filter passed to the tracing subscriber
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

pub const DEFAULT_LOG_FILTER: &str = "info,wgpu=error,naga=warn";

impl Config {
    /// Resolve the scene: file values first, then command-line overrides.
    pub fn scene(&self) -> Result<SceneConfig> {
        let mut scene = match &self.config {
            Some(path) => SceneConfig::from_json_file(path)?,
            None => SceneConfig::default(),
        };
        if let Some(function) = &self.function {
            scene.initial_function = function.clone();
        }
        if let Some(mode) = self.mode {
            scene.initial_mode = mode;
        }
        scene.validate()?;
        Ok(scene)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub background: Color,
    pub initial_mode: DisplayMode,
    pub initial_function: String,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub labels: LabelConfig,
    pub plot: PlotConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            initial_mode: DisplayMode::ThreeD,
            initial_function: String::new(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            axes: AxesConfig::default(),
            grid: GridConfig::default(),
            labels: LabelConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).change_context(AxiscopeError::ConfigParse)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .change_context(AxiscopeError::ConfigRead)
            .attach(format!("path: {}", path.display()))?;
        Self::from_json_str(&text).attach(format!("path: {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).change_context(AxiscopeError::ConfigSerialize)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Report::new(AxiscopeError::InvalidConfig(msg.to_owned())));

        if !(self.plot.step > 0.0) || !self.plot.step.is_finite() {
            return invalid("plot.step must be a positive number");
        }
        if !(self.plot.max >= self.plot.min)
            || !self.plot.min.is_finite()
            || !self.plot.max.is_finite()
        {
            return invalid("plot.min and plot.max must be finite with max not below min");
        }
        if !((self.plot.max - self.plot.min) / self.plot.step < MAX_SAMPLES as f64) {
            return invalid("plot domain has too many samples for plot.step");
        }
        if self.plot.variable.trim().is_empty() {
            return invalid("plot.variable must not be empty");
        }
        if self.grid.tiers.is_empty() {
            return invalid("grid.tiers must list at least one tier");
        }
        if self.grid.divisions == 0 {
            return invalid("grid.divisions must be at least 1");
        }
        if self.labels.max_steps == 0 || !(self.labels.range_factor > 0.0) {
            return invalid("labels.max_steps and labels.range_factor must be positive");
        }
        if !(self.camera.near > 0.0) {
            return invalid("camera.near must be positive");
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return invalid("camera.fov_degrees must be between 0 and 180");
        }
        let orbit = &self.camera.orbit;
        if !(0.0..=1.0).contains(&orbit.damping) {
            return invalid("camera.orbit.damping must be within 0..=1");
        }
        if !(orbit.min_distance > 0.0) || !orbit.min_distance.is_finite() {
            return invalid("camera.orbit.min_distance must be a positive number");
        }
        if let Some(max) = orbit.max_distance {
            if !(max >= orbit.min_distance) {
                return invalid("camera.orbit.max_distance must not be below min_distance");
            }
        }
        if !(orbit.zoom_step > 0.0) || !orbit.zoom_step.is_finite() {
            return invalid("camera.orbit.zoom_step must be a positive number");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: DVec3,
    /// Pose forced when switching to 2D.
    pub frontal_position: DVec3,
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    pub orbit: OrbitConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: DVec3::new(15.0, 15.0, 15.0),
            frontal_position: DVec3::new(0.0, 0.0, 15.0),
            fov_degrees: 75.0,
            near: 0.1,
            far: 9_007_199_254_740_991.0,
            orbit: OrbitConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub damping: f64,
    /// Radians per pixel of drag.
    pub rotate_speed: f64,
    /// Fraction of the orbit radius per pixel of drag.
    pub pan_speed: f64,
    /// Radius multiplier per wheel line.
    pub zoom_step: f64,
    pub min_distance: f64,
    /// `None` leaves zoom-out unbounded.
    pub max_distance: Option<f64>,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping: 0.05,
            rotate_speed: 0.005,
            pan_speed: 0.0015,
            zoom_step: 0.95,
            min_distance: 0.1,
            max_distance: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient: Color,
    pub ambient_brightness: f32,
    pub directional: Color,
    pub directional_illuminance: f32,
    pub directional_position: DVec3,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: Color::hex(0x404040),
            ambient_brightness: 300.0,
            directional: Color::WHITE,
            directional_illuminance: 5_000.0,
            directional_position: DVec3::new(1.0, 1.0, 1.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub length: f64,
    pub arrow_radius: f64,
    pub arrow_height: f64,
    pub arrow_segments: u32,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            length: 10.0,
            arrow_radius: 0.1,
            arrow_height: 0.2,
            arrow_segments: 16,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridTier {
    pub factor: f64,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub tiers: Vec<GridTier>,
    /// Edge length of tier factor 1.
    pub base_size: f64,
    pub divisions: u32,
    /// Shift of the XY and YZ planes along their normal, keeps them behind the axis lines.
    pub plane_offset: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        let tier = |factor: f64, hex: u32| GridTier {
            factor,
            color: Color::hex(hex),
        };
        Self {
            tiers: vec![
                tier(1.0, 0x555555),
                tier(10.0, 0x444444),
                tier(100.0, 0x333333),
                tier(1000.0, 0x222222),
            ],
            base_size: 100.0,
            divisions: 100,
            plane_offset: -0.0001,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Labels span `±range_factor * scale`.
    pub range_factor: f64,
    pub max_steps: u32,
    pub base_size: f64,
    /// Distance of labels from the axis they annotate.
    pub axis_offset: f64,
    pub texture_base: f64,
    pub texture_max: f64,
    pub font_base: f64,
    pub font_max: f64,
    pub color: Color,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            range_factor: 15.0,
            max_steps: 20,
            base_size: 1.5,
            axis_offset: -0.5,
            texture_base: 64.0,
            texture_max: 256.0,
            font_base: 16.0,
            font_max: 32.0,
            color: Color::WHITE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub variable: String,
    pub color: Color,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            min: -5000.0,
            max: 5000.0,
            step: 0.1,
            variable: "x".to_owned(),
            color: Color::hex(0x00ff00),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let scene = SceneConfig::from_json_str(r#"{ "initial_function": "sin(x)", "plot": { "step": 0.5 } }"#)
            .expect("valid json");
        assert_eq!(scene.initial_function, "sin(x)");
        assert_eq!(scene.plot.step, 0.5);
        assert_eq!(scene.plot.min, -5000.0);
        assert_eq!(scene.grid.tiers.len(), 4);
    }

    #[test]
    fn cli_overrides_defaults() {
        let cfg = Config::parse_from(["axiscope", "--function", "x^3", "--mode", "2d"]);
        let scene = cfg.scene().expect("valid");
        assert_eq!(scene.initial_function, "x^3");
        assert_eq!(scene.initial_mode, DisplayMode::TwoD);
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn zero_step_is_rejected() {
        let mut scene = SceneConfig::default();
        scene.plot.step = 0.0;
        let err = scene.validate().expect_err("zero step");
        assert!(matches!(
            err.current_context(),
            AxiscopeError::InvalidConfig(_)
        ));
    }

    #[test]
    fn json_output_reads_back() {
        let mut scene = SceneConfig::default();
        scene.initial_mode = DisplayMode::TwoD;
        let json = scene.to_json().expect("serializes");
        assert_eq!(SceneConfig::from_json_str(&json).expect("valid json"), scene);
    }
}
