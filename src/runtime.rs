use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::render::{AxisRenderPlugin, HostBridge, SceneConfigRes, SceneRes};

fn log_plugin(filter: &str) -> LogPlugin {
    LogPlugin {
        filter: filter.to_owned(),
        ..default()
    }
}

fn app_with(scene: SceneConfig, bridge: HostBridge) -> App {
    let bg = scene.background;
    let state = SceneRes::new(&scene);
    // the startup function may already have been rejected
    bridge.report_notice(&state.0);

    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(bg.r, bg.g, bg.b)))
        .insert_resource(state)
        .insert_resource(SceneConfigRes(scene))
        .insert_resource(bridge);
    app
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_app(scene: SceneConfig, log_filter: &str) {
    let mut app = app_with(scene, HostBridge::default());
    app.add_plugins((
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "axiscope".into(),
                    ..default()
                }),
                ..default()
            })
            .set(log_plugin(log_filter)),
        AxisRenderPlugin,
    ))
    .run();
}

#[cfg(target_arch = "wasm32")]
pub fn run_app(scene: SceneConfig, log_filter: &str, canvas_id: &str, bridge: HostBridge) {
    let mut app = app_with(scene, bridge);
    app.add_plugins((
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    canvas: Some(format!("#{}", canvas_id)),
                    fit_canvas_to_parent: true,
                    ..default()
                }),
                ..default()
            })
            .set(log_plugin(log_filter)),
        AxisRenderPlugin,
    ))
    .run();
}
