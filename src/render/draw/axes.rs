use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy_mesh::PrimitiveTopology;

use super::{line_material, line_mesh};
use crate::core::{AxesGroup, Axis, DisplayMode};
use crate::render::{AxesRoot, AxisPart};

/// Cones point along +Y; turn them onto their axis.
fn arrow_rotation(axis: Axis) -> Quat {
    match axis {
        Axis::X => Quat::from_rotation_z(-FRAC_PI_2),
        Axis::Y => Quat::IDENTITY,
        Axis::Z => Quat::from_rotation_x(FRAC_PI_2),
    }
}

pub fn spawn_axes(
    commands: &mut Commands,
    axes: &AxesGroup,
    mode: DisplayMode,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let root = commands
        .spawn((AxesRoot, Transform::default(), Visibility::default()))
        .id();

    let head = &axes.arrowhead;
    let cone = meshes.add(
        Cone::new(head.radius as f32, head.height as f32)
            .mesh()
            .resolution(head.segments),
    );

    for line in &axes.lines {
        let material = line_material(materials, line.color);
        let visibility = if AxesGroup::is_visible(line.axis, mode) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        let shaft = commands
            .spawn((
                AxisPart(line.axis),
                Mesh3d(meshes.add(line_mesh(PrimitiveTopology::LineList, [line.start, line.end]))),
                MeshMaterial3d(material.clone()),
                Transform::default(),
                visibility,
            ))
            .id();
        commands.entity(root).add_child(shaft);

        let tip = commands
            .spawn((
                AxisPart(line.axis),
                Mesh3d(cone.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(line.end.as_vec3())
                    .with_rotation(arrow_rotation(line.axis)),
                visibility,
            ))
            .id();
        commands.entity(root).add_child(tip);
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_point_along_their_axis() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let tip = arrow_rotation(axis) * Vec3::Y;
            assert!((tip - axis.unit().as_vec3()).length() < 1e-6, "{axis:?}");
        }
    }
}
