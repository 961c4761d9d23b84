use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::WindowResized;
use bevy_camera::{PerspectiveProjection, Projection};

use super::ui::{BUTTON_HOVERED, BUTTON_IDLE, BUTTON_PRESSED, FIELD_FOCUSED, FIELD_IDLE};
use super::*;
use crate::camera::{OrbitCamera, OrbitSettings};
use crate::core::AxesGroup;
use crate::labels::CameraPose;
use crate::plotter::PlotOutcome;
use crate::scene::Revisions;

/// Wheel pixels that count as one line notch.
const PIXELS_PER_LINE: f32 = 100.0;

pub fn setup_camera(mut commands: Commands, config: Res<SceneConfigRes>) {
    let cam = &config.0.camera;
    let orbit = OrbitCamera::new(cam.position.as_vec3(), OrbitSettings::from(&cam.orbit));

    commands.spawn((
        MainCamera { orbit },
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: (cam.fov_degrees as f32).to_radians(),
            near: cam.near as f32,
            far: cam.far as f32,
            ..default()
        }),
        Transform::from_translation(orbit.position()).with_rotation(orbit.rotation()),
    ));
}

pub fn setup_axes(
    mut commands: Commands,
    scene: Res<SceneRes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_axes(
        &mut commands,
        scene.0.axes(),
        scene.0.mode(),
        &mut meshes,
        &mut materials,
    );
}

/// Forward commands queued from outside the world.
pub fn drain_host_commands(bridge: Res<HostBridge>, mut out: MessageWriter<AxiscopeCommand>) {
    for command in bridge.drain() {
        out.write(command);
    }
}

pub fn focus_function_field(
    mouse: Res<ButtonInput<MouseButton>>,
    mut fields: Query<(&Interaction, &mut FunctionField, &mut BackgroundColor)>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    for (interaction, mut field, mut bg) in &mut fields {
        let focused = *interaction == Interaction::Pressed;
        if field.focused != focused {
            field.focused = focused;
            *bg = BackgroundColor(if focused { FIELD_FOCUSED } else { FIELD_IDLE });
        }
    }
}

pub fn handle_text_input(
    mut keys: MessageReader<KeyboardInput>,
    mut fields: Query<(&mut FunctionField, &mut BackgroundColor)>,
    mut scene: ResMut<SceneRes>,
    mut out: MessageWriter<AxiscopeCommand>,
) {
    let mut focused = fields.iter().any(|(f, _)| f.focused);

    for ev in keys.read() {
        if ev.state != ButtonState::Pressed {
            continue;
        }
        match &ev.logical_key {
            Key::Escape => {
                for (mut field, mut bg) in &mut fields {
                    field.focused = false;
                    *bg = BackgroundColor(FIELD_IDLE);
                }
                focused = false;
                out.write(AxiscopeCommand::DismissNotice);
            }
            _ if !focused => {}
            Key::Enter => {
                out.write(AxiscopeCommand::Plot(scene.0.input().to_owned()));
            }
            Key::Backspace => {
                let mut text = scene.0.input().to_owned();
                text.pop();
                scene.0.set_input(text);
            }
            Key::Space => {
                let text = format!("{} ", scene.0.input());
                scene.0.set_input(text);
            }
            Key::Character(chars) => {
                let mut text = scene.0.input().to_owned();
                text.extend(chars.chars().filter(|c| !c.is_control()));
                scene.0.set_input(text);
            }
            _ => {}
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn handle_buttons(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor, Has<PlotButton>, Has<ToggleButton>),
        (Changed<Interaction>, With<Button>, Without<FunctionField>),
    >,
    scene: Res<SceneRes>,
    mut out: MessageWriter<AxiscopeCommand>,
) {
    for (interaction, mut bg, is_plot, is_toggle) in &mut buttons {
        *bg = BackgroundColor(match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        });
        if *interaction != Interaction::Pressed {
            continue;
        }
        if is_plot {
            out.write(AxiscopeCommand::Plot(scene.0.input().to_owned()));
        }
        if is_toggle {
            out.write(AxiscopeCommand::ToggleMode);
        }
    }
}

pub fn apply_commands(
    mut incoming: MessageReader<AxiscopeCommand>,
    mut scene: ResMut<SceneRes>,
    mut cameras: Query<&mut MainCamera>,
    bridge: Res<HostBridge>,
) {
    for command in incoming.read() {
        match command {
            AxiscopeCommand::Plot(text) => {
                if let PlotOutcome::Rejected(_) = scene.0.submit_function(text) {
                    bridge.report_notice(&scene.0);
                }
            }
            AxiscopeCommand::ToggleMode => {
                let transition = scene.0.toggle_mode();
                if let Some(reset) = transition.camera_reset {
                    for mut camera in &mut cameras {
                        camera
                            .orbit
                            .reset_to(reset.position.as_vec3(), reset.target.as_vec3());
                    }
                }
                tracing::info!(mode = %transition.mode, "display mode switched");
            }
            AxiscopeCommand::DismissNotice => {
                if scene.0.notice().is_some() {
                    scene.0.dismiss_notice();
                }
            }
        }
    }
}

#[derive(Default)]
pub struct DragState {
    /// The current drag began over the control panel.
    over_ui: bool,
}

pub fn orbit_camera(
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    mut wheel: MessageReader<MouseWheel>,
    ui: Query<&Interaction, Or<(With<UiPanel>, With<Button>)>>,
    mut drag: Local<DragState>,
    mut cameras: Query<(&mut MainCamera, &mut Transform)>,
) {
    let over_ui = ui.iter().any(|i| *i != Interaction::None);
    if mouse.any_just_pressed([MouseButton::Left, MouseButton::Right]) {
        drag.over_ui = over_ui;
    }

    let delta = motion.read().fold(Vec2::ZERO, |acc, m| acc + m.delta);
    let lines: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y,
            MouseScrollUnit::Pixel => w.y / PIXELS_PER_LINE,
        })
        .sum();

    for (mut camera, mut transform) in &mut cameras {
        let orbit = &mut camera.orbit;
        if !drag.over_ui {
            if mouse.pressed(MouseButton::Left) {
                orbit.rotate(delta.x, delta.y);
            } else if mouse.pressed(MouseButton::Right) {
                orbit.pan(delta.x, delta.y);
            }
        }
        if lines != 0.0 && !over_ui {
            orbit.zoom(lines);
        }
        orbit.update();

        let (translation, rotation) = (orbit.position(), orbit.rotation());
        if transform.translation != translation || transform.rotation != rotation {
            transform.translation = translation;
            transform.rotation = rotation;
        }
    }
}

pub fn update_scale(mut scene: ResMut<SceneRes>, cameras: Query<&Transform, With<MainCamera>>) {
    let Ok(transform) = cameras.single() else {
        return;
    };
    let distance = f64::from(transform.translation.length());
    // only take write access when the decade actually moved
    if crate::scale::select(distance) != scene.0.scale() {
        scene.0.frame(distance);
    }
}

pub fn sync_axes_visibility(scene: Res<SceneRes>, mut parts: Query<(&AxisPart, &mut Visibility)>) {
    if !scene.is_changed() {
        return;
    }
    for (part, mut visibility) in &mut parts {
        visibility.set_if_neq(if AxesGroup::is_visible(part.0, scene.0.mode()) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

/// Replace whatever descriptor sets changed since they were last spawned.
#[allow(clippy::too_many_arguments)]
pub fn redraw_scene(
    mut commands: Commands,
    scene: Res<SceneRes>,
    config: Res<SceneConfigRes>,
    assets: Res<SceneAssets>,
    mut drawn: ResMut<DrawnRevisions>,
    grids: Query<Entity, With<GridRoot>>,
    label_roots: Query<Entity, With<LabelRoot>>,
    lines: Query<Entity, With<PlotLine>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let current = scene.0.revisions();
    let previous = drawn.0;
    if previous == Some(current) {
        return;
    }
    let stale = |field: fn(&Revisions) -> u64| previous.is_none_or(|p| field(&p) != field(&current));

    if stale(|r| r.grid) {
        for entity in &grids {
            commands.entity(entity).try_despawn();
        }
        spawn_grid(&mut commands, scene.0.grid(), &mut meshes, &mut materials);
    }

    if stale(|r| r.labels) {
        for entity in &label_roots {
            commands.entity(entity).try_despawn();
        }
        spawn_labels(&mut commands, scene.0.labels(), config.0.labels.color);
    }

    if stale(|r| r.curve) {
        for entity in &lines {
            commands.entity(entity).try_despawn();
        }
        if let Some(curve) = scene.0.curve() {
            spawn_curve(&mut commands, curve, assets.curve_material.clone(), &mut meshes);
        }
    }

    drawn.0 = Some(current);
}

pub fn place_labels(
    scene: Res<SceneRes>,
    cameras: Query<(&Camera, &Transform, &Projection), With<MainCamera>>,
    mut labels: Query<(
        &AxisLabel,
        &mut Node,
        &mut TextFont,
        &mut Visibility,
        &ComputedNode,
    )>,
) {
    let Ok((camera, transform, projection)) = cameras.single() else {
        return;
    };
    let Projection::Perspective(perspective) = projection else {
        return;
    };

    // this frame's pose, not last frame's propagated one
    let global = GlobalTransform::from(*transform);
    let pose = CameraPose {
        position: transform.translation.as_dvec3(),
        rotation: transform.rotation.as_dquat(),
    };
    let set = scene.0.labels();

    for (label, mut node, mut font, mut visibility, computed) in &mut labels {
        let Some(placement) = place_label(camera, &global, perspective.fov, &pose, set, label.index)
        else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };

        let size = computed.size() * computed.inverse_scale_factor();
        node.left = Val::Px(placement.center.x - size.x * 0.5);
        node.top = Val::Px(placement.center.y - size.y * 0.5);
        if (font.font_size - placement.font_px).abs() > 0.5 {
            font.font_size = placement.font_px;
        }
        visibility.set_if_neq(Visibility::Inherited);
    }
}

#[allow(clippy::type_complexity)]
pub fn sync_ui(
    scene: Res<SceneRes>,
    fields: Query<&FunctionField>,
    mut texts: ParamSet<(
        Query<&mut Text, With<FunctionFieldText>>,
        Query<&mut Text, With<ToggleCaption>>,
        Query<&mut Text, With<NoticeText>>,
    )>,
    mut banners: Query<&mut Node, With<NoticeBanner>>,
) {
    let focused = fields.iter().any(|f| f.focused);
    let field_text = if focused {
        format!("{}|", scene.0.input())
    } else {
        scene.0.input().to_owned()
    };
    for mut text in &mut texts.p0() {
        if text.0 != field_text {
            text.0.clone_from(&field_text);
        }
    }

    if !scene.is_changed() {
        return;
    }

    let caption = scene.0.toggle_caption();
    for mut text in &mut texts.p1() {
        if text.0 != caption {
            text.0 = caption.to_owned();
        }
    }

    let notice = scene
        .0
        .notice()
        .map(|n| format!("{} {}", n.message, n.detail));
    for mut text in &mut texts.p2() {
        text.0 = notice.clone().unwrap_or_default();
    }
    for mut node in &mut banners {
        node.display = if notice.is_some() {
            Display::Flex
        } else {
            Display::None
        };
    }
}

pub fn publish_host_status(scene: Res<SceneRes>, bridge: Res<HostBridge>) {
    if !scene.is_changed() {
        return;
    }
    let mut status = bridge.status.lock();
    status.mode = scene.0.mode();
    status.toggle_caption = scene.0.toggle_caption().to_owned();
    status.scale = scene.0.scale();
}

pub fn log_window_resize(mut resized: MessageReader<WindowResized>) {
    for ev in resized.read() {
        tracing::debug!(width = ev.width, height = ev.height, "window resized");
    }
}

/// The browser page shows rejected functions with a blocking alert.
#[cfg(target_arch = "wasm32")]
pub fn alert_rejected_function(bridge: Res<HostBridge>) {
    let Some(message) = bridge.take_notice() else {
        return;
    };
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.alert_with_message(&message) {
            tracing::warn!(?err, "alert failed");
        }
    }
}
