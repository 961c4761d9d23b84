//! Application state shared by the render layer and the host API.

use crate::config::SceneConfig;
use crate::core::{Arrowhead, AxesGroup, DisplayMode, GridSet, LabelSet, PlotCurve};
use crate::expr::ParseError;
use crate::grid::GridBuilder;
use crate::labels::LabelBuilder;
use crate::mode::{ModeController, ModeTransition, toggle_caption};
use crate::plotter::{FunctionPlotter, PlotOutcome};
use crate::scale::{ScaleChange, ScaleTracker};

pub const INVALID_FUNCTION: &str = "Invalid function!";

/// User-facing message shown after a rejected input.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: &'static str,
    pub detail: String,
}

impl Notice {
    fn invalid_function(err: &ParseError) -> Self {
        Self {
            message: INVALID_FUNCTION,
            detail: err.to_string(),
        }
    }
}

/// Bumped whenever the matching descriptor set is replaced. The render layer
/// compares these against what it last drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Revisions {
    pub grid: u64,
    pub labels: u64,
    pub curve: u64,
    pub mode: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameUpdate {
    pub scale_change: Option<ScaleChange>,
}

#[derive(Clone, Debug)]
pub struct SceneState {
    modes: ModeController,
    scale: ScaleTracker,
    grid_builder: GridBuilder,
    label_builder: LabelBuilder,
    plotter: FunctionPlotter,
    axes: AxesGroup,
    grid: GridSet,
    labels: LabelSet,
    input: String,
    notice: Option<Notice>,
    revisions: Revisions,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

impl SceneState {
    /// Builds the initial scene and plots the configured startup function.
    pub fn new(config: &SceneConfig) -> Self {
        let modes = ModeController::new(config.initial_mode, config.camera.frontal_position);
        let scale = ScaleTracker::default();
        let grid_builder = GridBuilder::new(&config.grid);
        let label_builder = LabelBuilder::new(&config.labels);
        let grid = grid_builder.build(scale.current(), modes.mode());
        let labels = label_builder.build(scale.current(), modes.mode());
        let axes = AxesGroup::new(
            config.axes.length,
            Arrowhead {
                radius: config.axes.arrow_radius,
                height: config.axes.arrow_height,
                segments: config.axes.arrow_segments,
            },
        );

        let mut state = Self {
            modes,
            scale,
            grid_builder,
            label_builder,
            plotter: FunctionPlotter::new(&config.plot),
            axes,
            grid,
            labels,
            input: String::new(),
            notice: None,
            revisions: Revisions::default(),
        };
        state.submit_function(&config.initial_function);
        state
    }

    fn rebuild(&mut self) {
        let (scale, mode) = (self.scale.current(), self.modes.mode());
        self.grid = self.grid_builder.build(scale, mode);
        self.labels = self.label_builder.build(scale, mode);
        self.revisions.grid += 1;
        self.revisions.labels += 1;
    }

    /// Per-frame step: re-derive the scale from the camera distance and
    /// rebuild grid and labels if it moved to another decade.
    pub fn frame(&mut self, camera_distance: f64) -> FrameUpdate {
        let scale_change = self.scale.update(camera_distance);
        if scale_change.is_some() {
            self.rebuild();
        }
        FrameUpdate { scale_change }
    }

    pub fn toggle_mode(&mut self) -> ModeTransition {
        let transition = self.modes.toggle();
        self.rebuild();
        self.revisions.mode += 1;
        transition
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Plot whatever the input field currently holds.
    pub fn submit_input(&mut self) -> PlotOutcome {
        let text = self.input.clone();
        self.submit_function(&text)
    }

    pub fn submit_function(&mut self, text: &str) -> PlotOutcome {
        self.input = text.to_owned();
        self.notice = None;
        let outcome = self.plotter.plot(text);
        self.revisions.curve += 1;
        if let PlotOutcome::Rejected(err) = &outcome {
            self.notice = Some(Notice::invalid_function(err));
        }
        outcome
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn mode(&self) -> DisplayMode {
        self.modes.mode()
    }

    pub fn scale(&self) -> f64 {
        self.scale.current()
    }

    pub fn z_axis_visible(&self) -> bool {
        self.modes.z_axis_visible()
    }

    pub fn toggle_caption(&self) -> &'static str {
        toggle_caption(self.modes.mode())
    }

    pub fn axes(&self) -> &AxesGroup {
        &self.axes
    }

    pub fn grid(&self) -> &GridSet {
        &self.grid
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn curve(&self) -> Option<&PlotCurve> {
        self.plotter.curve()
    }

    pub fn revisions(&self) -> Revisions {
        self.revisions
    }
}
