use crate::edges::Edge;
use glam::Vec2;

/// Raw mesh data that can be used by any rendering engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// Output of triangulating one chunk: the render mesh plus the solid/empty boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkGeometry {
    pub mesh: MeshData,
    pub edges: Vec<Edge>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a convex polygon as a triangle fan around its first vertex.
    ///
    /// Indices continue from the current vertex count so polygons from many cells share one
    /// buffer.
    pub fn push_polygon(&mut self, points: &[Vec2], uv: impl Fn(Vec2) -> Vec2) {
        if points.len() < 3 {
            return;
        }
        let base = self.positions.len() as u32;
        for &point in points {
            self.positions.push([point.x, point.y, 0.0]);
            self.uvs.push(uv(point).to_array());
        }
        for i in 1..(points.len() as u32 - 1) {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygons_share_one_index_buffer() {
        let mut mesh = MeshData::default();
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        mesh.push_polygon(&square, |p| p);
        mesh.push_polygon(&square[..3], |p| p);

        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6]);
        assert_eq!(mesh.uvs.len(), mesh.positions.len());
    }

    #[test]
    fn degenerate_polygons_are_skipped() {
        let mut mesh = MeshData::default();
        mesh.push_polygon(&[Vec2::ZERO, Vec2::ONE], |p| p);
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }
}
