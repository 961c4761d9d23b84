//! Spawning of scene content from the descriptor sets built by the pure core.
//! Every function here creates a fresh root; callers despawn the old one.

mod axes;
mod curve;
mod grid;
mod labels;

pub use axes::*;
pub use curve::*;
pub use grid::*;
pub use labels::*;

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::PrimitiveTopology;
use glam::DVec3;

/// Unlit material for line work.
pub(crate) fn line_material(
    materials: &mut Assets<StandardMaterial>,
    color: crate::core::Color,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color.into(),
        unlit: true,
        ..default()
    })
}

pub(crate) fn line_mesh(topology: PrimitiveTopology, points: impl IntoIterator<Item = DVec3>) -> Mesh {
    let positions: Vec<[f32; 3]> = points
        .into_iter()
        .map(|p| p.as_vec3().to_array())
        .collect();
    Mesh::new(topology, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}
