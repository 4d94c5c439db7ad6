//! Marching squares over a chunk's node grid.
//!
//! Each cell looks at its four corner nodes and picks one of sixteen templates. A template
//! is a set of convex polygons (filled with a triangle fan) built from the cell corners and
//! edge midpoints, plus the boundary segments between solid and empty space.
//!
//! Corner bits: `a` bottom-left = 8, `b` bottom-right = 4, `c` top-right = 2, `d` top-left = 1.
//! The saddle cases 5 and 10 keep their two solid corners as separate triangles.

use crate::atlas::UvRect;
use crate::chunk::NodeGrid;
use crate::edges::Edge;
use crate::mesh_data::{ChunkGeometry, MeshData};
use glam::Vec2;

// cell corners
const BL: Vec2 = Vec2::new(0.0, 0.0);
const BR: Vec2 = Vec2::new(1.0, 0.0);
const TR: Vec2 = Vec2::new(1.0, 1.0);
const TL: Vec2 = Vec2::new(0.0, 1.0);
// edge midpoints
const B: Vec2 = Vec2::new(0.5, 0.0);
const R: Vec2 = Vec2::new(1.0, 0.5);
const T: Vec2 = Vec2::new(0.5, 1.0);
const L: Vec2 = Vec2::new(0.0, 0.5);

/// Geometry of one marching-squares case in unit-cell space. Polygons wind counter-clockwise.
#[derive(Debug, Clone, Copy)]
pub struct CellTemplate {
    pub polygons: &'static [&'static [Vec2]],
    pub edges: &'static [(Vec2, Vec2)],
}

const TEMPLATES: [CellTemplate; 16] = [
    // 0: empty
    CellTemplate {
        polygons: &[],
        edges: &[],
    },
    // 1: d
    CellTemplate {
        polygons: &[&[L, T, TL]],
        edges: &[(L, T)],
    },
    // 2: c
    CellTemplate {
        polygons: &[&[T, R, TR]],
        edges: &[(T, R)],
    },
    // 3: c d
    CellTemplate {
        polygons: &[&[L, R, TR, TL]],
        edges: &[(L, R)],
    },
    // 4: b
    CellTemplate {
        polygons: &[&[B, BR, R]],
        edges: &[(B, R)],
    },
    // 5: b d
    CellTemplate {
        polygons: &[&[B, BR, R], &[L, T, TL]],
        edges: &[(B, R), (L, T)],
    },
    // 6: b c
    CellTemplate {
        polygons: &[&[B, BR, TR, T]],
        edges: &[(B, T)],
    },
    // 7: b c d
    CellTemplate {
        polygons: &[&[L, B, BR, TR, TL]],
        edges: &[(L, B)],
    },
    // 8: a
    CellTemplate {
        polygons: &[&[BL, B, L]],
        edges: &[(B, L)],
    },
    // 9: a d
    CellTemplate {
        polygons: &[&[BL, B, T, TL]],
        edges: &[(B, T)],
    },
    // 10: a c
    CellTemplate {
        polygons: &[&[BL, B, L], &[T, R, TR]],
        edges: &[(B, L), (T, R)],
    },
    // 11: a c d
    CellTemplate {
        polygons: &[&[BL, B, R, TR, TL]],
        edges: &[(B, R)],
    },
    // 12: a b
    CellTemplate {
        polygons: &[&[BL, BR, R, L]],
        edges: &[(R, L)],
    },
    // 13: a b d
    CellTemplate {
        polygons: &[&[BL, BR, R, T, TL]],
        edges: &[(R, T)],
    },
    // 14: a b c
    CellTemplate {
        polygons: &[&[BL, BR, TR, T, L]],
        edges: &[(T, L)],
    },
    // 15: full
    CellTemplate {
        polygons: &[&[BL, BR, TR, TL]],
        edges: &[],
    },
];

pub fn case_index(a: bool, b: bool, c: bool, d: bool) -> u8 {
    (a as u8) << 3 | (b as u8) << 2 | (c as u8) << 1 | d as u8
}

pub fn template(case: u8) -> &'static CellTemplate {
    &TEMPLATES[(case & 0x0F) as usize]
}

/// Case of the cell whose bottom-left node is `(x, y)`.
pub fn cell_case(nodes: &NodeGrid, x: usize, y: usize) -> u8 {
    case_index(
        nodes.get(x, y),
        nodes.get(x + 1, y),
        nodes.get(x + 1, y + 1),
        nodes.get(x, y + 1),
    )
}

/// Triangulate every cell of `nodes` into one mesh. Positions and edges are chunk-local.
pub fn triangulate(nodes: &NodeGrid, uv_rect: UvRect) -> ChunkGeometry {
    let mut geometry = ChunkGeometry::default();
    let cells = nodes.cells_per_axis();
    for y in 0..cells {
        for x in 0..cells {
            let case = cell_case(nodes, x, y);
            let offset = Vec2::new(x as f32, y as f32);
            push_cell(
                case,
                offset,
                uv_rect,
                &mut geometry.mesh,
                &mut geometry.edges,
            );
        }
    }
    geometry
}

/// Emit the template for `case` translated by `offset`. Every cell maps onto the whole tile.
pub fn push_cell(
    case: u8,
    offset: Vec2,
    uv_rect: UvRect,
    mesh: &mut MeshData,
    edges: &mut Vec<Edge>,
) {
    let cell = template(case);
    for polygon in cell.polygons {
        let points: Vec<Vec2> = polygon.iter().map(|&p| p + offset).collect();
        mesh.push_polygon(&points, |p| uv_rect.map(p - offset));
    }
    edges.extend(
        cell.edges
            .iter()
            .map(|&(a, b)| Edge::new(a, b).offset(offset)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn single_cell(case: u8) -> ChunkGeometry {
        let mut geometry = ChunkGeometry::default();
        push_cell(
            case,
            Vec2::ZERO,
            UvRect::FULL,
            &mut geometry.mesh,
            &mut geometry.edges,
        );
        geometry
    }

    fn signed_area(points: &[Vec2]) -> f32 {
        let mut area = 0.0;
        for i in 0..points.len() {
            let (p, q) = (points[i], points[(i + 1) % points.len()]);
            area += p.x * q.y - q.x * p.y;
        }
        area / 2.0
    }

    #[test]
    fn case_bits_follow_corner_weights() {
        assert_eq!(case_index(false, false, false, false), 0);
        assert_eq!(case_index(true, false, false, false), 8);
        assert_eq!(case_index(false, true, false, false), 4);
        assert_eq!(case_index(false, false, true, false), 2);
        assert_eq!(case_index(false, false, false, true), 1);
        assert_eq!(case_index(true, true, true, true), 15);
        assert_eq!(case_index(false, true, true, true), 7);
    }

    #[test]
    fn every_case_produces_whole_triangles_with_valid_indices() {
        for case in 0..16u8 {
            let geometry = single_cell(case);
            let mesh = &geometry.mesh;
            assert_eq!(mesh.indices.len() % 3, 0, "case {case}");
            assert_eq!(mesh.uvs.len(), mesh.positions.len(), "case {case}");
            assert!(
                mesh.indices
                    .iter()
                    .all(|&i| (i as usize) < mesh.positions.len()),
                "case {case}"
            );
        }
    }

    #[test]
    fn empty_cell_has_no_geometry() {
        let geometry = single_cell(0);
        assert!(geometry.mesh.is_empty());
        assert!(geometry.mesh.positions.is_empty());
        assert!(geometry.edges.is_empty());
    }

    #[test]
    fn full_cell_is_two_triangles_without_edges() {
        let geometry = single_cell(15);
        assert_eq!(geometry.mesh.indices.len(), 6);
        assert!(geometry.edges.is_empty());
    }

    #[test]
    fn polygons_wind_counter_clockwise() {
        for (case, cell) in TEMPLATES.iter().enumerate() {
            for polygon in cell.polygons {
                assert!(signed_area(polygon) > 0.0, "case {case}");
            }
        }
    }

    // area grows with every solid corner: one corner 1/8, two adjacent 1/2, three 7/8
    #[rstest]
    #[case(1, 0.125)]
    #[case(8, 0.125)]
    #[case(3, 0.5)]
    #[case(9, 0.5)]
    #[case(5, 0.25)]
    #[case(10, 0.25)]
    #[case(7, 0.875)]
    #[case(14, 0.875)]
    #[case(15, 1.0)]
    fn filled_area_matches_case(#[case] case: u8, #[case] expected: f32) {
        let area: f32 = template(case)
            .polygons
            .iter()
            .map(|polygon| signed_area(polygon))
            .sum();
        assert!((area - expected).abs() < 1e-6, "case {case}: {area}");
    }

    #[test]
    fn boundary_edges_only_on_mixed_cells() {
        for case in 0..16u8 {
            let expected = match case {
                0 | 15 => 0,
                5 | 10 => 2,
                _ => 1,
            };
            assert_eq!(template(case).edges.len(), expected, "case {case}");
        }
    }

    #[test]
    fn cell_offset_is_applied_to_positions_and_edges() {
        let mut geometry = ChunkGeometry::default();
        push_cell(
            8,
            Vec2::new(3.0, 2.0),
            UvRect::FULL,
            &mut geometry.mesh,
            &mut geometry.edges,
        );
        assert_eq!(geometry.mesh.positions[0], [3.0, 2.0, 0.0]);
        assert_eq!(
            geometry.edges,
            vec![Edge::new(Vec2::new(3.5, 2.0), Vec2::new(3.0, 2.5))]
        );
        // uvs stay in cell space
        assert_eq!(geometry.mesh.uvs[0], [0.0, 1.0]);
    }

    #[test]
    fn full_grid_is_two_triangles_per_cell() {
        let nodes = NodeGrid::filled(3);
        let geometry = triangulate(&nodes, UvRect::FULL);
        assert_eq!(geometry.mesh.triangle_count(), 3 * 3 * 2);
        assert!(geometry.edges.is_empty());
    }

    #[test]
    fn single_hole_yields_closed_boundary() {
        let mut nodes = NodeGrid::filled(2);
        nodes.set(1, 1, false);
        let geometry = triangulate(&nodes, UvRect::FULL);

        // the four cells around the hole each contribute one segment
        assert_eq!(geometry.edges.len(), 4);
        let paths = crate::edges::merge_edges(&geometry.edges);
        assert_eq!(paths.len(), 1);
        assert!(crate::edges::is_closed(&paths[0]));
    }
}
