pub mod components;
pub mod draw;
pub mod resources;
pub mod systems;
pub mod ui;

pub use components::*;
pub use draw::*;
pub use resources::*;
use systems::*;
use ui::setup_ui;

use bevy::prelude::*;

/// Axes, grid, labels, curve and control panel driven by a [`SceneRes`].
///
/// Expects [`SceneRes`] and [`SceneConfigRes`] to be inserted before startup.
#[derive(Default)]
pub struct AxisRenderPlugin;

impl Plugin for AxisRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawnRevisions>()
            .init_resource::<HostBridge>()
            .add_message::<AxiscopeCommand>()
            .add_systems(
                Startup,
                (setup_global_scene, setup_camera, setup_axes, setup_ui),
            )
            .add_systems(
                Update,
                (
                    drain_host_commands,
                    focus_function_field,
                    handle_text_input,
                    handle_buttons,
                    apply_commands,
                    orbit_camera,
                    update_scale,
                    sync_axes_visibility,
                    redraw_scene,
                    place_labels,
                    sync_ui,
                    publish_host_status,
                    log_window_resize,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Update, alert_rejected_function.after(publish_host_status));
    }
}
