use glam::DVec3;

use crate::config::{DEFAULT_LOG_FILTER, GridTier, SceneConfig};
use crate::core::{Color, DisplayMode};

/// Programmatic counterpart of the command line.
///
/// ```no_run
/// use axiscope::prelude::*;
///
/// axiscope()
///     .mode(DisplayMode::TwoD)
///     .function("sin(x) * x")
///     .run_local()
///     .unwrap();
/// ```
pub fn axiscope() -> AxiscopeBuilder {
    AxiscopeBuilder {
        scene: SceneConfig::default(),
        log_filter: DEFAULT_LOG_FILTER.to_owned(),
    }
}

pub struct AxiscopeBuilder {
    scene: SceneConfig,
    log_filter: String,
}

impl AxiscopeBuilder {
    /// Start from an existing configuration, e.g. one loaded from a file.
    pub fn config(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    pub fn background_color(mut self, c: Color) -> Self {
        self.scene.background = c;
        self
    }

    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.scene.initial_mode = mode;
        self
    }

    /// Expression plotted at startup.
    pub fn function(mut self, expr: impl Into<String>) -> Self {
        self.scene.initial_function = expr.into();
        self
    }

    pub fn camera_position(mut self, position: DVec3) -> Self {
        self.scene.camera.position = position;
        self
    }

    /// Sampling range and spacing of the plotted curve.
    pub fn plot_domain(mut self, min: f64, max: f64, step: f64) -> Self {
        self.scene.plot.min = min;
        self.scene.plot.max = max;
        self.scene.plot.step = step;
        self
    }

    pub fn curve_color(mut self, c: Color) -> Self {
        self.scene.plot.color = c;
        self
    }

    pub fn grid_tiers(mut self, tiers: Vec<GridTier>) -> Self {
        self.scene.grid.tiers = tiers;
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Validated configuration, without starting anything.
    pub fn build(self) -> crate::Result<SceneConfig> {
        self.scene.validate()?;
        Ok(self.scene)
    }

    /// Open a window and run until it is closed (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run_local(self) -> crate::Result<()> {
        let filter = self.log_filter.clone();
        let scene = self.build()?;
        crate::runtime::run_app(scene, &filter);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let scene = axiscope()
            .mode(DisplayMode::TwoD)
            .function("x^2")
            .plot_domain(-10.0, 10.0, 0.5)
            .build()
            .expect("valid");
        assert_eq!(scene.initial_mode, DisplayMode::TwoD);
        assert_eq!(scene.initial_function, "x^2");
        assert_eq!(scene.plot.step, 0.5);
    }

    #[test]
    fn invalid_domain_is_reported() {
        assert!(axiscope().plot_domain(1.0, -1.0, 0.1).build().is_err());
    }
}
