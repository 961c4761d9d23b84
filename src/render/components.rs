use bevy::prelude::*;

use crate::camera::OrbitCamera;
use crate::core::Axis;

/// The scene camera and its orbit state.
#[derive(Component, Clone, Copy, Debug)]
pub struct MainCamera {
    pub orbit: OrbitCamera,
}

/// Parent of all grid planes. Its uniform scale tracks the active scale.
#[derive(Component)]
pub struct GridRoot;

#[derive(Component)]
pub struct AxesRoot;

/// Line or arrowhead that belongs to an axis.
#[derive(Component, Clone, Copy)]
pub struct AxisPart(pub Axis);

/// Parent of the numeric label texts.
#[derive(Component)]
pub struct LabelRoot;

/// UI text anchored to a point on an axis, indexes into the current label set.
#[derive(Component, Clone, Copy)]
pub struct AxisLabel {
    pub index: usize,
}

#[derive(Component)]
pub struct PlotLine;

/// Top-left control panel; pointer drags starting over it do not orbit.
#[derive(Component)]
pub struct UiPanel;

/// Text field holding the expression being edited.
#[derive(Component, Default)]
pub struct FunctionField {
    pub focused: bool,
}

#[derive(Component)]
pub struct FunctionFieldText;

#[derive(Component)]
pub struct PlotButton;

#[derive(Component)]
pub struct ToggleButton;

#[derive(Component)]
pub struct ToggleCaption;

/// Red banner shown after a rejected function.
#[derive(Component)]
pub struct NoticeBanner;

#[derive(Component)]
pub struct NoticeText;
