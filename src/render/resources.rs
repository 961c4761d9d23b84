use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::config::SceneConfig;
use crate::core::DisplayMode;
use crate::scene::{Revisions, SceneState};

#[derive(Resource)]
pub struct SceneRes(pub SceneState);

impl SceneRes {
    pub fn new(config: &SceneConfig) -> Self {
        Self(SceneState::new(config))
    }
}

#[derive(Resource, Clone)]
pub struct SceneConfigRes(pub SceneConfig);

/// Revisions of the descriptor sets currently spawned. `None` until first drawn.
#[derive(Resource, Default)]
pub struct DrawnRevisions(pub Option<Revisions>);

/// Requests applied to the scene in one place, whatever their source.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum AxiscopeCommand {
    Plot(String),
    ToggleMode,
    DismissNotice,
}

/// Snapshot published for a host embedding the app.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostStatus {
    pub mode: DisplayMode,
    pub toggle_caption: String,
    pub scale: f64,
    /// Set when a submitted function was rejected; cleared by the host once shown.
    pub pending_notice: Option<String>,
}

/// Channel between the app and code outside the Bevy world (the wasm host page).
#[derive(Resource, Clone, Default)]
pub struct HostBridge {
    pub commands: Arc<Mutex<VecDeque<AxiscopeCommand>>>,
    pub status: Arc<Mutex<HostStatus>>,
}

impl HostBridge {
    pub fn push(&self, command: AxiscopeCommand) {
        self.commands.lock().push_back(command);
    }

    pub fn drain(&self) -> Vec<AxiscopeCommand> {
        self.commands.lock().drain(..).collect()
    }

    pub fn status(&self) -> HostStatus {
        self.status.lock().clone()
    }

    pub fn take_notice(&self) -> Option<String> {
        self.status.lock().pending_notice.take()
    }

    /// Queue the scene's current notice, if any, for the host to show.
    pub fn report_notice(&self, scene: &SceneState) {
        if let Some(notice) = scene.notice() {
            self.status.lock().pending_notice = Some(notice.message.to_owned());
        }
    }
}

/// Shared meshes and materials reused across rebuilds.
#[derive(Resource)]
pub struct SceneAssets {
    pub curve_material: Handle<StandardMaterial>,
}

pub fn setup_global_scene(
    mut commands: Commands,
    config: Res<SceneConfigRes>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let lighting = &config.0.lighting;
    commands.insert_resource(AmbientLight {
        color: lighting.ambient.into(),
        brightness: lighting.ambient_brightness,
        ..default()
    });

    let p = lighting.directional_position.as_vec3();
    commands.spawn((
        DirectionalLight {
            color: lighting.directional.into(),
            illuminance: lighting.directional_illuminance,
            ..default()
        },
        Transform::from_translation(p).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(SceneAssets {
        curve_material: materials.add(StandardMaterial {
            base_color: config.0.plot.color.into(),
            unlit: true,
            ..default()
        }),
    });
}
