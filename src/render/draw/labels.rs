use bevy::prelude::*;

use crate::core::{Color as AxisColor, LabelSet};
use crate::labels::{CameraPose, label_transform};
use crate::render::{AxisLabel, LabelRoot};

/// Glyphs larger than this are not worth rasterising.
const MAX_FONT_PX: f32 = 256.0;
const MIN_FONT_PX: f32 = 1.0;

pub fn spawn_labels(commands: &mut Commands, set: &LabelSet, color: AxisColor) -> Entity {
    let root = commands
        .spawn((
            LabelRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            // keep labels under the control panel
            GlobalZIndex(-1),
        ))
        .id();

    for (index, label) in set.labels.iter().enumerate() {
        let child = commands
            .spawn((
                AxisLabel { index },
                Text::new(label.text.clone()),
                TextFont {
                    font_size: set.glyph.font_size as f32,
                    ..default()
                },
                TextColor(color.into()),
                Node {
                    position_type: PositionType::Absolute,
                    ..default()
                },
                Visibility::Hidden,
            ))
            .id();
        commands.entity(root).add_child(child);
    }

    root
}

/// Where a label lands on screen this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    /// Logical pixels, origin top-left.
    pub center: Vec2,
    pub font_px: f32,
}

/// Project a label through the camera. `None` when it is behind the camera or
/// too small to read.
pub fn place_label(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    fov: f32,
    pose: &CameraPose,
    set: &LabelSet,
    index: usize,
) -> Option<LabelPlacement> {
    let label = set.labels.get(index)?;
    let transform = label_transform(pose, label);
    let world = transform.translation.as_vec3();

    let depth = (world - camera_transform.translation()).dot(camera_transform.forward().as_vec3());
    if depth <= 0.0 {
        return None;
    }

    let center = camera.world_to_viewport(camera_transform, world).ok()?;
    let viewport = camera.logical_viewport_size()?;

    // label height in world units, mapped to pixels at this depth
    let pixels_per_unit = viewport.y / (2.0 * depth * (fov * 0.5).tan());
    let font_px = transform.size.y as f32 * pixels_per_unit * set.glyph.text_fraction() as f32;
    if !font_px.is_finite() || font_px < MIN_FONT_PX {
        return None;
    }

    Some(LabelPlacement {
        center,
        font_px: font_px.min(MAX_FONT_PX),
    })
}
