use glam::DVec3;

use crate::core::DisplayMode;

/// Camera pose forced by a mode change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraReset {
    pub position: DVec3,
    pub target: DVec3,
}

/// Everything a toggle changed, applied by the caller in one go.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeTransition {
    pub mode: DisplayMode,
    pub z_axis_visible: bool,
    pub camera_reset: Option<CameraReset>,
    pub toggle_caption: &'static str,
}

/// Caption of the toggle control: the action it will perform next.
pub fn toggle_caption(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::TwoD => "Switch to 3D",
        DisplayMode::ThreeD => "Switch to 2D",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModeController {
    mode: DisplayMode,
    frontal_camera: DVec3,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(DisplayMode::ThreeD, DVec3::new(0.0, 0.0, 15.0))
    }
}

impl ModeController {
    pub fn new(mode: DisplayMode, frontal_camera: DVec3) -> Self {
        Self {
            mode,
            frontal_camera,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn z_axis_visible(&self) -> bool {
        self.mode.is_3d()
    }

    pub fn toggle(&mut self) -> ModeTransition {
        self.mode = self.mode.toggled();
        let camera_reset = (!self.mode.is_3d()).then_some(CameraReset {
            position: self.frontal_camera,
            target: DVec3::ZERO,
        });
        tracing::debug!(mode = %self.mode, "display mode toggled");

        ModeTransition {
            mode: self.mode,
            z_axis_visible: self.z_axis_visible(),
            camera_reset,
            toggle_caption: toggle_caption(self.mode),
        }
    }
}
