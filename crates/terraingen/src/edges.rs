use glam::Vec2;
use std::collections::VecDeque;

/// Endpoints closer than this are treated as the same point when stitching.
pub const MERGE_EPSILON: f32 = 0.001;

/// A boundary segment between solid and empty space, in chunk-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: Vec2,
    pub b: Vec2,
}

impl Edge {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn offset(self, by: Vec2) -> Self {
        Self::new(self.a + by, self.b + by)
    }
}

/// Stitch loose edges into polylines by repeatedly growing a path from either end.
///
/// Each match removes one edge from the pool, and a path that cannot grow any further
/// consumes its seed edge, so the loop always terminates. Closed loops come back with the
/// first point repeated at the end. Output order is unspecified.
pub fn merge_edges(edges: &[Edge]) -> Vec<Vec<Vec2>> {
    let mut pool = edges.to_vec();
    let mut paths = Vec::new();

    while let Some(seed) = pool.pop() {
        let mut path = VecDeque::from([seed.a, seed.b]);
        while let Some(index) = extend_path(&mut path, &pool) {
            pool.swap_remove(index);
        }
        paths.push(Vec::from(path));
    }

    paths
}

/// Try to attach one pooled edge to either end of `path`; returns the used edge's index.
fn extend_path(path: &mut VecDeque<Vec2>, pool: &[Edge]) -> Option<usize> {
    let (&front, &back) = (path.front()?, path.back()?);
    for (index, edge) in pool.iter().enumerate() {
        if same_point(edge.a, back) {
            path.push_back(edge.b);
        } else if same_point(edge.b, back) {
            path.push_back(edge.a);
        } else if same_point(edge.a, front) {
            path.push_front(edge.b);
        } else if same_point(edge.b, front) {
            path.push_front(edge.a);
        } else {
            continue;
        }
        return Some(index);
    }
    None
}

pub fn is_closed(path: &[Vec2]) -> bool {
    match (path.first(), path.last()) {
        (Some(&first), Some(&last)) => path.len() > 2 && same_point(first, last),
        _ => false,
    }
}

fn same_point(a: Vec2, b: Vec2) -> bool {
    a.distance_squared(b) <= MERGE_EPSILON * MERGE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn scrambled_square_becomes_one_closed_loop() {
        // the four sides of a unit square, shuffled and with mixed orientation
        let edges = [
            Edge::new(v(1.0, 1.0), v(1.0, 0.0)),
            Edge::new(v(0.0, 0.0), v(0.0, 1.0)),
            Edge::new(v(1.0, 0.0), v(0.0, 0.0)),
            Edge::new(v(1.0, 1.0), v(0.0, 1.0)),
        ];

        let paths = merge_edges(&edges);

        assert_eq!(paths.len(), 1);
        let path = &paths[0];
        assert!(is_closed(path));
        let mut unique = path.clone();
        unique.pop();
        assert!(unique.len() == 4 || unique.len() == 5);
        for corner in [v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)] {
            assert!(unique.iter().any(|&p| same_point(p, corner)));
        }
    }

    #[test]
    fn chain_grows_from_both_ends() {
        // seed is the middle edge (popped last), neighbours attach at front and back
        let edges = [
            Edge::new(v(2.0, 0.0), v(3.0, 0.0)),
            Edge::new(v(0.0, 0.0), v(1.0, 0.0)),
            Edge::new(v(1.0, 0.0), v(2.0, 0.0)),
        ];

        let paths = merge_edges(&edges);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 4);
        assert!(!is_closed(&paths[0]));
        let ends = [paths[0][0], paths[0][3]];
        assert!(ends.contains(&v(0.0, 0.0)));
        assert!(ends.contains(&v(3.0, 0.0)));
    }

    #[test]
    fn endpoints_within_epsilon_are_joined() {
        let edges = [
            Edge::new(v(0.0, 0.0), v(1.0, 0.0)),
            Edge::new(v(1.0005, 0.0), v(2.0, 0.0)),
        ];
        assert_eq!(merge_edges(&edges).len(), 1);
    }

    #[test]
    fn disjoint_edges_stay_separate() {
        let edges = [
            Edge::new(v(0.0, 0.0), v(1.0, 0.0)),
            Edge::new(v(5.0, 5.0), v(6.0, 5.0)),
        ];

        let paths = merge_edges(&edges);

        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.len() == 2));
    }

    #[test]
    fn no_edges_no_paths() {
        assert!(merge_edges(&[]).is_empty());
    }
}
