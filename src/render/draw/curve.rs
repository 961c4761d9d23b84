use bevy::prelude::*;
use bevy_mesh::PrimitiveTopology;

use super::line_mesh;
use crate::core::PlotCurve;
use crate::render::PlotLine;

pub fn spawn_curve(
    commands: &mut Commands,
    curve: &PlotCurve,
    material: Handle<StandardMaterial>,
    meshes: &mut Assets<Mesh>,
) -> Option<Entity> {
    // a strip needs two points
    if curve.len() < 2 {
        return None;
    }

    let mesh = line_mesh(PrimitiveTopology::LineStrip, curve.points.iter().copied());
    let entity = commands
        .spawn((
            PlotLine,
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material),
            Transform::default(),
        ))
        .id();
    Some(entity)
}
