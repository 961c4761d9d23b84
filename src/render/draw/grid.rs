use bevy::prelude::*;
use bevy_mesh::PrimitiveTopology;

use super::{line_material, line_mesh};
use crate::core::GridSet;
use crate::render::GridRoot;

pub fn spawn_grid(
    commands: &mut Commands,
    set: &GridSet,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let root = commands
        .spawn((
            GridRoot,
            Transform::from_scale(Vec3::splat(set.content_scale() as f32)),
            Visibility::default(),
        ))
        .id();

    for plane in &set.planes {
        let points = plane.segments().into_iter().flat_map(|(a, b)| [a, b]);
        let child = commands
            .spawn((
                Mesh3d(meshes.add(line_mesh(PrimitiveTopology::LineList, points))),
                MeshMaterial3d(line_material(materials, plane.color)),
                Transform::default(),
            ))
            .id();
        commands.entity(root).add_child(child);
    }

    tracing::debug!(planes = set.planes.len(), scale = set.scale, "grid spawned");
    root
}
