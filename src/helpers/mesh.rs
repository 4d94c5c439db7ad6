use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;
use terraingen::mesh_data::MeshData;

/// Convert a chunk's raw triangle buffers into a flat, camera-facing Bevy mesh.
pub fn chunk_mesh(mesh_data: &MeshData) -> Mesh {
    let normals = vec![[0.0, 0.0, 1.0]; mesh_data.positions.len()];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, mesh_data.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, mesh_data.uvs.clone());
    mesh.insert_indices(Indices::U32(mesh_data.indices.clone()));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    #[test]
    fn chunk_mesh_keeps_every_buffer() {
        let mut data = MeshData::default();
        data.positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        data.uvs = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
        data.indices = vec![0, 1, 2];

        let mesh = chunk_mesh(&data);

        assert_eq!(mesh.count_vertices(), 3);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(3));
        match mesh.attribute(Mesh::ATTRIBUTE_NORMAL) {
            Some(VertexAttributeValues::Float32x3(normals)) => {
                assert!(normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
            }
            other => panic!("unexpected normals {other:?}"),
        }
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
    }

    #[test]
    fn empty_chunk_gives_empty_mesh() {
        let mesh = chunk_mesh(&MeshData::default());
        assert_eq!(mesh.count_vertices(), 0);
    }
}
